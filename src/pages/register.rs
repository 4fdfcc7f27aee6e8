//! Registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::BrowserApi;
use crate::net::types::RegisterRequest;
use crate::util::auth::LOGIN_ROUTE;

const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=20;
const PASSWORD_LENGTH: std::ops::RangeInclusive<usize> = 3..=40;

/// Loose shape check: one `@`, a non-empty local part, and a dotted domain.
pub fn is_valid_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

pub fn validate_register_input(
    email: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> Result<RegisterRequest, &'static str> {
    let email = email.trim();
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    if email.is_empty() {
        return Err("Email is required.");
    }
    if !is_valid_email(email) {
        return Err("Email is not valid.");
    }
    if !NAME_LENGTH.contains(&first_name.chars().count()) {
        return Err("First name must be 3 to 20 characters.");
    }
    if !NAME_LENGTH.contains(&last_name.chars().count()) {
        return Err("Last name must be 3 to 20 characters.");
    }
    if !PASSWORD_LENGTH.contains(&password.chars().count()) {
        return Err("Password must be 3 to 40 characters.");
    }
    Ok(RegisterRequest {
        email: email.to_owned(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        password: password.to_owned(),
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_register_input(&email.get(), &first_name.get(), &last_name.get(), &password.get()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api.register(&request).await {
                Ok(()) => navigate(LOGIN_ROUTE, NavigateOptions::default()),
                Err(e) => {
                    log::warn!("register: rejected: {e}");
                    info.set("An error occurred".to_owned());
                }
            }
            busy.set(false);
        });
    };

    let field = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=label
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Register"</h1>
                <form class="login-form" on:submit=on_submit>
                    {field("First name", "text", first_name)}
                    {field("Last name", "text", last_name)}
                    {field("Email", "email", email)}
                    {field("Password", "password", password)}
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
