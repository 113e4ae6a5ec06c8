//! Auth provider component and context hooks

use super::store::AuthStore;
use crate::config::resolve_options;
use crate::cookie::DocumentCookieJar;
use crate::hooks::{FetchState, use_api};
use latch_core::{AuthOptions, AuthState};
use latch_http::{ApiClient, AuthError};
use serde::de::DeserializeOwned;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Value published to descendants of [`AuthProvider`]
///
/// Carries a snapshot of the state so consumers re-render on every change.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthContext {
    store: AuthStore,
    state: AuthState,
}

impl AuthContext {
    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn api_client(&self) -> ApiClient {
        self.store.api_client()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        self.store.login(username, password).await
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.logout().await
    }

    /// Callback that logs in with `(username, password)` and reports the outcome
    pub fn login_callback(
        &self,
        on_done: Callback<Result<(), AuthError>>,
    ) -> Callback<(String, String)> {
        let store = self.store.clone();
        Callback::from(move |(username, password): (String, String)| {
            let store = store.clone();
            let on_done = on_done.clone();
            spawn_local(async move {
                on_done.emit(store.login(&username, &password).await);
            });
        })
    }

    /// Callback that logs out on any event
    pub fn logout_callback<E: 'static>(&self) -> Callback<E> {
        let store = self.store.clone();
        Callback::from(move |_: E| {
            let store = store.clone();
            spawn_local(async move {
                // State is cleared either way; the failure is already logged
                let _ = store.logout().await;
            });
        })
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub options: AuthOptions,
    pub children: Children,
}

/// Auth provider backed by the document's cookies
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let store = use_memo(props.options.clone(), |options| {
        AuthStore::new(
            resolve_options(options.clone()),
            Rc::new(DocumentCookieJar::new()),
        )
        .map_err(|error| {
            tracing::error!(%error, "Failed to create auth store");
            error.to_string()
        })
    });

    match &*store {
        Ok(store) => html! {
            <AuthStoreProvider store={store.clone()}>
                {props.children.clone()}
            </AuthStoreProvider>
        },
        Err(error) => html! {
            <div class="p-4 text-red-700 dark:text-red-300">{error}</div>
        },
    }
}

/// Props for providing an existing store
#[derive(Properties, PartialEq)]
pub struct AuthStoreProviderProps {
    pub store: AuthStore,
    pub children: Children,
}

/// Publish an existing [`AuthStore`] as context
#[function_component(AuthStoreProvider)]
pub fn auth_store_provider(props: &AuthStoreProviderProps) -> Html {
    let state = use_state(|| props.store.state());

    {
        let state = state.clone();
        use_effect_with(props.store.clone(), move |store| {
            state.set(store.state());
            let subscription = store.subscribe(move |next| state.set(next.clone()));
            move || drop(subscription)
        });
    }

    let context = AuthContext {
        store: props.store.clone(),
        state: (*state).clone(),
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
///
/// # Panics
///
/// Panics when called outside an [`AuthProvider`].
#[hook]
pub fn use_auth() -> AuthContext {
    require_provider(use_context::<AuthContext>())
}

fn require_provider(context: Option<AuthContext>) -> AuthContext {
    context.expect("use_auth must be used within an AuthProvider")
}

/// Auth context if an [`AuthProvider`] is present
#[hook]
pub fn try_use_auth() -> Option<AuthContext> {
    use_context::<AuthContext>()
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    use_auth().is_authenticated()
}

#[hook]
pub fn use_token() -> Option<String> {
    use_auth().token().map(str::to_owned)
}

/// Fetch `endpoint` with the provider's authenticated client
#[hook]
pub fn use_authenticated_api<T>(endpoint: &str) -> FetchState<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let client = use_auth().api_client();
    use_api::<T>(endpoint, &client)
}
