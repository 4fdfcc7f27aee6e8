//! Login page: email + password against `POST /auth/login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::BrowserApi;
use crate::net::types::LoginRequest;
use crate::state::session::SessionStore;

pub const LOGIN_FAILED_MESSAGE: &str = "An error occurred";
const AFTER_LOGIN_ROUTE: &str = "/sessions";

/// Trim both fields and require them to be present.
pub fn validate_login_input(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_login_input(&email.get(), &password.get()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        let api = api.clone();
        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api.login(&request).await {
                Ok(identity) => match session.log_in(&identity) {
                    Ok(()) => navigate(AFTER_LOGIN_ROUTE, NavigateOptions::default()),
                    Err(e) => {
                        log::error!("login: could not persist session: {e}");
                        info.set(LOGIN_FAILED_MESSAGE.to_owned());
                    }
                },
                Err(e) => {
                    log::warn!("login: rejected: {e}");
                    info.set(LOGIN_FAILED_MESSAGE.to_owned());
                }
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Login"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="Email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Submit"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
