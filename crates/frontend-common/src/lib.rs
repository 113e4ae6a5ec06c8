//! Yew integration for Latch
//!
//! Wrap the application in [`AuthProvider`], read the state with
//! [`use_auth`], fetch with [`use_authenticated_api`] and guard routes with
//! [`ProtectedRoute`].

pub mod auth;
pub mod components;
pub mod config;
pub mod cookie;
pub mod guard;
pub mod hooks;
pub mod logging;

pub use auth::{
    AuthContext, AuthProvider, AuthStore, LoginForm, use_auth, use_authenticated_api,
    use_is_authenticated,
};
pub use components::Spinner;
pub use cookie::DocumentCookieJar;
pub use guard::{AuthRoute, GuardOutcome, ProtectedRoute, guard_outcome};
pub use hooks::{FetchState, use_api};
