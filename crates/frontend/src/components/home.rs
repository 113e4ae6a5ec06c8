use crate::app::Route;
use latch_frontend_common::use_is_authenticated;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Home)]
pub fn home() -> Html {
    let is_authenticated = use_is_authenticated();

    html! {
        <main class="max-w-2xl mx-auto p-8">
            <h1 class="text-3xl font-bold text-gray-900 dark:text-white mb-4">{"Latch"}</h1>
            if is_authenticated {
                <Link<Route> to={Route::Dashboard} classes="text-blue-600 hover:underline">
                    {"Go to dashboard"}
                </Link<Route>>
            } else {
                <Link<Route> to={Route::Login} classes="text-blue-600 hover:underline">
                    {"Sign in"}
                </Link<Route>>
            }
        </main>
    }
}
