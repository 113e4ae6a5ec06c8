//! Username and password login form

use super::use_auth;
use latch_http::AuthError;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    /// Called after a successful login
    #[prop_or_default]
    pub on_success: Callback<()>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let auth = use_auth();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let submitting = use_state(|| false);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let login = {
        let error = error.clone();
        let submitting = submitting.clone();
        let on_success = props.on_success.clone();
        auth.login_callback(Callback::from(move |result: Result<(), AuthError>| {
            submitting.set(false);
            match result {
                Ok(()) => {
                    error.set(None);
                    on_success.emit(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        }))
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if username.is_empty() {
                return;
            }
            submitting.set(true);
            login.emit(((*username).clone(), (*password).clone()));
        })
    };

    html! {
        <form class="max-w-sm w-full mx-auto p-6 bg-white dark:bg-gray-800 rounded-lg shadow" onsubmit={on_submit}>
            <h2 class="text-xl font-bold mb-4 text-gray-800 dark:text-white">{"Sign in"}</h2>

            <label class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">{"Username"}</label>
            <input
                type="text"
                class="w-full px-4 py-2 mb-4 border border-gray-300 dark:border-gray-600 rounded-lg bg-white dark:bg-gray-700 text-gray-900 dark:text-white"
                autocomplete="username"
                value={(*username).clone()}
                oninput={on_username_input}
                required=true
            />

            <label class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">{"Password"}</label>
            <input
                type="password"
                class="w-full px-4 py-2 mb-4 border border-gray-300 dark:border-gray-600 rounded-lg bg-white dark:bg-gray-700 text-gray-900 dark:text-white"
                autocomplete="current-password"
                value={(*password).clone()}
                oninput={on_password_input}
            />

            if let Some(message) = &*error {
                <div class="mb-4 p-3 bg-red-50 dark:bg-red-900/20 rounded-lg text-sm text-red-800 dark:text-red-200">
                    {message}
                </div>
            }

            <button
                type="submit"
                disabled={*submitting || username.is_empty()}
                class="w-full px-4 py-3 bg-blue-600 text-white rounded-lg hover:bg-blue-700 transition-colors disabled:opacity-50 disabled:cursor-not-allowed font-medium"
            >
                if *submitting { {"Signing in..."} } else { {"Sign in"} }
            </button>
        </form>
    }
}
