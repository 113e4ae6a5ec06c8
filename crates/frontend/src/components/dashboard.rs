use latch_frontend_common::{Spinner, use_auth, use_authenticated_api};
use serde::Deserialize;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct Profile {
    username: String,
    #[serde(default)]
    email: Option<String>,
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let auth = use_auth();
    let profile = use_authenticated_api::<Profile>("/api/me");
    let on_logout = auth.logout_callback::<MouseEvent>();

    let body = match (profile.data, profile.loading, profile.error) {
        (_, true, _) => html! { <Spinner text={"Loading profile..."} /> },
        (_, false, Some(error)) => html! {
            <div class="p-3 bg-red-50 dark:bg-red-900/20 rounded-lg text-sm text-red-800 dark:text-red-200">
                {error}
            </div>
        },
        (Some(profile), false, None) => html! {
            <dl class="space-y-2 text-gray-800 dark:text-gray-200">
                <dt class="font-semibold">{"Username"}</dt>
                <dd>{profile.username}</dd>
                if let Some(email) = profile.email {
                    <dt class="font-semibold">{"Email"}</dt>
                    <dd>{email}</dd>
                }
            </dl>
        },
        (None, false, None) => html! {},
    };

    html! {
        <main class="max-w-2xl mx-auto p-8">
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{"Dashboard"}</h1>
                <button
                    onclick={on_logout}
                    class="px-4 py-2 bg-gray-200 dark:bg-gray-700 rounded-lg hover:bg-gray-300 dark:hover:bg-gray-600"
                >
                    {"Sign out"}
                </button>
            </div>
            {body}
        </main>
    }
}
