//! Top bar with primary navigation and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Always mounted above the routes. Link set follows the login signal through
//! the `AuthState` mirror.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::auth::HOME_ROUTE;

#[component]
pub fn Toolbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<SessionStore>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        if let Err(e) = session.log_out() {
            log::error!("toolbar: logout failed: {e}");
            return;
        }
        navigate(HOME_ROUTE, NavigateOptions::default());
    };

    let display_name = move || auth.get().display_name.unwrap_or_default();

    view! {
        <nav class="toolbar">
            <a href="/" class="toolbar__brand">"Yoga app"</a>
            <span class="toolbar__spacer"></span>
            <Show
                when=move || auth.get().logged_in
                fallback=|| {
                    view! {
                        <a href="/login" class="toolbar__link">"Login"</a>
                        <a href="/register" class="toolbar__link">"Register"</a>
                    }
                }
            >
                <a href="/sessions" class="toolbar__link">"Sessions"</a>
                <a href="/me" class="toolbar__link" title=display_name>"Account"</a>
            </Show>
            <button
                class="btn toolbar__logout"
                hidden=move || !auth.get().logged_in
                on:click=on_logout
                title="Logout"
            >
                "Logout"
            </button>
        </nav>
    }
}
