//! Account page for the logged-in user.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::BrowserApi;
use crate::net::error::ApiError;
use crate::net::types::User;
use crate::state::session::SessionStore;
use crate::util::auth::HOME_ROUTE;
use crate::util::format::{full_name, long_date};

#[component]
pub fn MePage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<SessionStore>();
    let navigate = use_navigate();
    let user = RwSignal::new(None::<Result<User, ApiError>>);
    let info = RwSignal::new(String::new());

    let user_id = session.user_id();
    let loader = api.clone();
    Effect::new(move || {
        let Some(id) = user_id else {
            user.set(Some(Err(ApiError::NotAuthenticated)));
            return;
        };
        let api = loader.clone();
        leptos::task::spawn_local(async move {
            user.set(Some(api.user(id).await));
        });
    });

    let can_delete = move || user.with(|u| matches!(u, Some(Ok(u)) if !u.admin));

    let on_delete = move |_| {
        let Some(id) = user_id else {
            return;
        };
        let api = api.clone();
        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = api.delete_user(id).await {
                log::warn!("me: account deletion failed: {e}");
                info.set("An error occurred".to_owned());
                return;
            }
            if let Err(e) = session.log_out() {
                log::error!("me: logout after deletion failed: {e}");
            }
            navigate(HOME_ROUTE, NavigateOptions::default());
        });
    };

    view! {
        <div class="me-page">
            <h1>"User information"</h1>
            {move || match user.get() {
                None => view! { <p>"Loading..."</p> }.into_any(),
                Some(Err(_)) => view! { <p>"An error occurred"</p> }.into_any(),
                Some(Ok(user)) => {
                    let admin = user.admin;
                    view! {
                        <dl class="me-page__details">
                            <dt>"Name"</dt>
                            <dd>{full_name(&user.first_name, &user.last_name.to_uppercase())}</dd>
                            <dt>"Email"</dt>
                            <dd>{user.email.clone()}</dd>
                            <Show when=move || admin>
                                <p class="me-page__badge">"You are admin"</p>
                            </Show>
                            <dt>"Create at"</dt>
                            <dd>{long_date(user.created_at.as_deref().unwrap_or_default())}</dd>
                            <dt>"Last update"</dt>
                            <dd>{long_date(user.updated_at.as_deref().unwrap_or_default())}</dd>
                        </dl>
                    }
                        .into_any()
                }
            }}
            <Show when=can_delete>
                <p>"Delete my account:"</p>
            </Show>
            <button
                class="btn btn--danger"
                hidden=move || !can_delete()
                on:click=on_delete
            >
                "Delete"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="login-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
