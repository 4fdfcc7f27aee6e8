//! Session list page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route. Fetches `GET /session` once on mount; admins
//! additionally get Create and Edit actions.

use leptos::prelude::*;

use crate::app::BrowserApi;
use crate::net::error::ApiError;
use crate::net::types::Session;
use crate::state::auth::AuthState;
use crate::util::format::long_date;

#[component]
pub fn SessionsPage() -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let sessions = RwSignal::new(None::<Result<Vec<Session>, ApiError>>);

    Effect::new(move || {
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let result = api.sessions().await;
            if let Err(e) = &result {
                log::warn!("sessions: list fetch failed: {e}");
            }
            sessions.set(Some(result));
        });
    });

    let is_admin = move || auth.get().admin;

    view! {
        <div class="sessions-page">
            <header class="sessions-page__header">
                <h1>"Sessions available"</h1>
                <Show when=is_admin>
                    <a href="/sessions/create" class="btn">"Create"</a>
                </Show>
            </header>
            {move || match sessions.get() {
                None => view! { <p class="sessions-page__status">"Loading..."</p> }.into_any(),
                Some(Err(_)) => {
                    view! { <p class="sessions-page__status">"An error occurred"</p> }.into_any()
                }
                Some(Ok(items)) if items.is_empty() => {
                    view! { <p class="sessions-page__status">"No sessions yet."</p> }.into_any()
                }
                Some(Ok(items)) => {
                    view! {
                        <ul class="sessions-list">
                            {items
                                .into_iter()
                                .filter_map(|session| session.id.map(|id| (id, session)))
                                .map(|(id, session)| view! { <SessionCard id=id session=session is_admin=is_admin()/> })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn SessionCard(id: i64, session: Session, is_admin: bool) -> impl IntoView {
    view! {
        <li class="session-card">
            <h2 class="session-card__name">{session.name}</h2>
            <p class="session-card__date">"Session on " {long_date(&session.date)}</p>
            <p class="session-card__description">{session.description}</p>
            <div class="session-card__actions">
                <a href=format!("/sessions/detail/{id}") class="btn">"Detail"</a>
                <Show when=move || is_admin>
                    <a href=format!("/sessions/update/{id}") class="btn">"Edit"</a>
                </Show>
            </div>
        </li>
    }
}
