//! Authentication module

pub mod context;
pub mod login_form;
pub mod store;

// Re-export commonly used items
pub use context::{
    AuthContext, AuthProvider, AuthStoreProvider, try_use_auth, use_auth,
    use_authenticated_api, use_is_authenticated, use_token,
};
pub use login_form::LoginForm;
pub use store::{AuthStore, Subscription};
