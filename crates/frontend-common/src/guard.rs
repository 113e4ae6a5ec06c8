//! Route guard for authenticated areas

use crate::auth::use_auth;
use latch_core::{AuthConfig, AuthState};
use yew::prelude::*;
use yew_router::prelude::*;

/// Routes the guard knows how to send visitors to
#[derive(Clone, Debug, PartialEq, Eq, Routable)]
pub enum AuthRoute {
    #[at("/login")]
    Login,
}

/// What a guarded route should do for a given state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Redirect(&'static str),
}

pub fn guard_outcome(state: &AuthState) -> GuardOutcome {
    if state.is_authenticated() {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect(AuthConfig::LOGIN_PATH)
    }
}

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub children: Children,
}

/// Renders its children when authenticated, otherwise redirects to `/login`
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let auth = use_auth();

    match guard_outcome(auth.state()) {
        GuardOutcome::Render => html! { <>{ props.children.clone() }</> },
        GuardOutcome::Redirect(_) => html! { <Redirect<AuthRoute> to={AuthRoute::Login} /> },
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::auth::{AuthStore, AuthStoreProvider};
    use latch_core::cookie::{CookieOptions, set_cookie};
    use latch_core::{AuthOptions, MemoryCookieJar};
    use std::rc::Rc;
    use std::time::Duration;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Properties, PartialEq)]
    struct GuardedPageProps {
        store: AuthStore,
    }

    #[function_component(GuardedPage)]
    fn guarded_page(props: &GuardedPageProps) -> Html {
        html! {
            <BrowserRouter>
                <AuthStoreProvider store={props.store.clone()}>
                    <ProtectedRoute>
                        <p>{ "members only" }</p>
                    </ProtectedRoute>
                </AuthStoreProvider>
            </BrowserRouter>
        }
    }

    fn store_with(token: Option<&str>) -> AuthStore {
        let jar = Rc::new(MemoryCookieJar::new());
        if let Some(token) = token {
            set_cookie(jar.as_ref(), "authToken", token, &CookieOptions::new()).unwrap();
        }
        let options = AuthOptions::new("http://localhost", "/login", "/logout");
        AuthStore::new(options, jar).unwrap()
    }

    async fn render(store: AuthStore) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        yew::Renderer::<GuardedPage>::with_root_and_props(root.clone(), GuardedPageProps { store })
            .render();
        yew::platform::time::sleep(Duration::from_millis(10)).await;
        root
    }

    #[wasm_bindgen_test]
    async fn renders_children_with_token() {
        let root = render(store_with(Some("abc"))).await;
        assert!(root.inner_html().contains("members only"));
    }

    #[wasm_bindgen_test]
    async fn redirects_to_login_without_token() {
        let root = render(store_with(None)).await;
        let pathname = web_sys::window().unwrap().location().pathname().unwrap();

        assert_eq!(pathname, AuthConfig::LOGIN_PATH);
        assert!(!root.inner_html().contains("members only"));
    }
}
