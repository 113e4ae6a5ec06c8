//! Reactive authentication store
//!
//! The store owns the cached [`AuthState`] and notifies subscribers on every
//! transition. It is framework agnostic; the Yew provider in
//! [`super::context`] is one subscriber among others.

use latch_core::cookie::get_cookie;
use latch_core::{AuthOptions, AuthState, CookieJar};
use latch_http::{ApiClient, AuthError, ClientError};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

type Listener = Rc<dyn Fn(&AuthState)>;

struct StoreInner {
    options: AuthOptions,
    jar: Rc<dyn CookieJar>,
    state: RefCell<AuthState>,
    client: RefCell<ApiClient>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
}

/// Shared handle to the authentication state. Clones refer to the same store.
#[derive(Clone)]
pub struct AuthStore {
    inner: Rc<StoreInner>,
}

/// Keeps a listener registered until dropped
#[must_use = "the listener is removed when the subscription is dropped"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl AuthStore {
    /// Create a store whose initial state is read from the token cookie
    pub fn new(options: AuthOptions, jar: Rc<dyn CookieJar>) -> Result<Self, ClientError> {
        let state = AuthState::from_token(get_cookie(jar.as_ref(), options.cookie_name()));
        let client = ApiClient::new(options.base_url.clone(), state.token().map(str::to_owned))?;
        debug!(authenticated = state.is_authenticated(), "Auth store created");

        Ok(Self {
            inner: Rc::new(StoreInner {
                options,
                jar,
                state: RefCell::new(state),
                client: RefCell::new(client),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        })
    }

    pub fn options(&self) -> &AuthOptions {
        &self.inner.options
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token().map(str::to_owned)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Client carrying the current token. A new identity after every token change.
    pub fn api_client(&self) -> ApiClient {
        self.inner.client.borrow().clone()
    }

    /// Register `listener` to be called with the new state after each change
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Log in and adopt the returned token. On failure the state is unchanged.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let token = latch_http::login(
            username,
            password,
            &self.inner.options,
            self.inner.jar.as_ref(),
        )
        .await?;
        self.set_state(AuthState::Authenticated { token });
        Ok(())
    }

    /// Log out. The state becomes anonymous before the server is called, so a
    /// hanging or failing logout endpoint never keeps the session alive.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let pending = latch_http::begin_logout(&self.inner.options, self.inner.jar.as_ref());
        self.set_state(AuthState::Anonymous);
        pending.send().await
    }

    /// Re-read the token cookie, picking up changes made outside the store
    pub fn refresh(&self) {
        let token = get_cookie(self.inner.jar.as_ref(), self.inner.options.cookie_name());
        self.set_state(AuthState::from_token(token));
    }

    fn set_state(&self, next: AuthState) {
        if *self.inner.state.borrow() == next {
            return;
        }

        debug!(authenticated = next.is_authenticated(), "Auth state changed");
        {
            let mut client = self.inner.client.borrow_mut();
            *client = client.with_auth_token(next.token().map(str::to_owned));
        }
        self.inner.state.replace(next.clone());

        // Listeners may subscribe or unsubscribe while being notified
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("base_url", &self.inner.options.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use latch_core::MemoryCookieJar;
    use latch_core::cookie::{CookieOptions, set_cookie};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(base_url: &str, jar: &Rc<MemoryCookieJar>) -> AuthStore {
        let options = AuthOptions::new(base_url, "/login", "/logout");
        AuthStore::new(options, jar.clone()).unwrap()
    }

    fn record(store: &AuthStore) -> (Rc<RefCell<Vec<AuthState>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = store.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        (seen, subscription)
    }

    #[test]
    fn initial_state_comes_from_cookie() {
        let jar = Rc::new(MemoryCookieJar::new());
        assert_eq!(store_for("http://x", &jar).state(), AuthState::Anonymous);

        set_cookie(jar.as_ref(), "authToken", "abc", &CookieOptions::new()).unwrap();
        let store = store_for("http://x", &jar);
        assert_eq!(store.token().as_deref(), Some("abc"));
        assert_eq!(store.api_client().auth_token(), Some("abc"));
    }

    #[test]
    fn refresh_picks_up_external_cookie_changes() {
        let jar = Rc::new(MemoryCookieJar::new());
        let store = store_for("http://x", &jar);
        let (seen, _subscription) = record(&store);

        set_cookie(jar.as_ref(), "authToken", "outside", &CookieOptions::new()).unwrap();
        store.refresh();
        store.refresh();

        assert!(store.is_authenticated());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn dropped_subscription_is_not_notified() {
        let jar = Rc::new(MemoryCookieJar::new());
        let store = store_for("http://x", &jar);
        let (seen, subscription) = record(&store);
        drop(subscription);

        set_cookie(jar.as_ref(), "authToken", "abc", &CookieOptions::new()).unwrap();
        store.refresh();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn listener_may_subscribe_during_notification() {
        let jar = Rc::new(MemoryCookieJar::new());
        let store = store_for("http://x", &jar);
        let nested = Rc::new(RefCell::new(Vec::new()));

        let _outer = {
            let store_handle = store.clone();
            let nested = nested.clone();
            store.subscribe(move |_| {
                nested.borrow_mut().push(store_handle.subscribe(|_| {}));
            })
        };

        set_cookie(jar.as_ref(), "authToken", "abc", &CookieOptions::new()).unwrap();
        store.refresh();
        assert_eq!(nested.borrow().len(), 1);
    }

    #[tokio::test]
    async fn login_adopts_returned_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
            .mount(&mock_server)
            .await;

        let jar = Rc::new(MemoryCookieJar::new());
        let store = store_for(&mock_server.uri(), &jar);
        let before = store.api_client();
        let (seen, _subscription) = record(&store);

        store.login("ada", "pw").await.unwrap();

        let expected = AuthState::Authenticated {
            token: "abc".into(),
        };
        assert_eq!(store.state(), expected);
        assert_eq!(get_cookie(jar.as_ref(), "authToken").as_deref(), Some("abc"));
        assert_eq!(*seen.borrow(), vec![expected]);
        assert_ne!(store.api_client(), before);
        assert_eq!(store.api_client().auth_token(), Some("abc"));
    }

    #[tokio::test]
    async fn failed_login_leaves_state_alone() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let jar = Rc::new(MemoryCookieJar::new());
        let store = store_for(&mock_server.uri(), &jar);
        let (seen, _subscription) = record(&store);

        let error = store.login("ada", "pw").await.unwrap_err();
        assert_eq!(error.to_string(), "Authentication failed");
        assert_eq!(store.state(), AuthState::Anonymous);
        assert!(seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn logout_clears_state_even_when_server_fails() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let jar = Rc::new(MemoryCookieJar::new());
        set_cookie(jar.as_ref(), "authToken", "abc", &CookieOptions::new()).unwrap();
        let store = store_for(&mock_server.uri(), &jar);
        let (seen, _subscription) = record(&store);

        assert_eq!(store.logout().await, Err(AuthError::LogoutFailed));
        assert_eq!(store.state(), AuthState::Anonymous);
        assert_eq!(get_cookie(jar.as_ref(), "authToken"), None);
        assert_eq!(*seen.borrow(), vec![AuthState::Anonymous]);
        assert_eq!(store.api_client().auth_token(), None);
    }

    #[tokio::test]
    async fn logout_clears_state_before_server_answers() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(600)))
            .mount(&mock_server)
            .await;

        let jar = Rc::new(MemoryCookieJar::new());
        set_cookie(jar.as_ref(), "authToken", "abc", &CookieOptions::new()).unwrap();
        let store = store_for(&mock_server.uri(), &jar);
        let (seen, _subscription) = record(&store);

        let result = tokio::time::timeout(Duration::from_millis(300), store.logout()).await;

        assert!(result.is_err());
        assert_eq!(store.state(), AuthState::Anonymous);
        assert_eq!(get_cookie(jar.as_ref(), "authToken"), None);
        assert_eq!(*seen.borrow(), vec![AuthState::Anonymous]);
    }
}
