use crate::components::{Dashboard, Home};
use latch_core::AuthOptions;
use latch_frontend_common::{AuthProvider, LoginForm, ProtectedRoute, use_auth};
use yew::prelude::*;
use yew_router::prelude::*;

const AUTH_OPTIONS: &str = include_str!("../auth.json");

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Login => html! { <LoginPage /> },
        Route::Dashboard => html! {
            <ProtectedRoute>
                <Dashboard />
            </ProtectedRoute>
        },
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let options = use_memo((), |_| AuthOptions::from_json(AUTH_OPTIONS));

    match &*options {
        Ok(options) => html! {
            <BrowserRouter>
                <AuthProvider options={options.clone()}>
                    <Switch<Route> render={switch} />
                </AuthProvider>
            </BrowserRouter>
        },
        Err(error) => {
            tracing::error!(%error, "Invalid auth configuration");
            html! { <p class="p-4 text-red-700">{format!("Invalid auth configuration: {error}")}</p> }
        }
    }
}

#[function_component(LoginPage)]
fn login_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();

    if auth.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }

    let on_success = Callback::from(move |()| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Dashboard);
        }
    });

    html! {
        <div class="min-h-screen flex items-center justify-center">
            <LoginForm {on_success} />
        </div>
    }
}
