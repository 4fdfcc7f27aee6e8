//! Session detail page driven by a [`ParticipationController`].
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller owns fetching and refresh ordering. This page only mirrors
//! its three broadcasts into signals, starts the driver once mounted, and
//! tears it down on cleanup.

#[cfg(test)]
#[path = "session_detail_test.rs"]
mod session_detail_test;

use std::sync::Arc;

use leptos::either::Either;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::app::BrowserApi;
use crate::components::notice::show_notice;
use crate::net::error::ApiError;
use crate::net::types::{Session, Teacher};
use crate::pages::not_found::NotFoundPage;
use crate::state::participation::ParticipationController;
use crate::state::session::SessionStore;
use crate::state::ui::UiState;
use crate::util::format::{attendee_label, full_name, long_date};

type Controller = ParticipationController<BrowserApi>;

/// Parse the `:id` route segment.
pub fn parse_session_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Label for a teacher slot that may still be loading or failed.
pub fn teacher_label(teacher: Option<&Result<Teacher, ApiError>>) -> String {
    match teacher {
        Some(Ok(teacher)) => full_name(&teacher.first_name, &teacher.last_name),
        Some(Err(_)) => "Unknown teacher".to_owned(),
        None => String::new(),
    }
}

#[component]
pub fn SessionDetailPage() -> impl IntoView {
    let params = use_params_map();
    let session_id = params.with_untracked(|p| parse_session_id(p.get("id").as_deref()));
    match session_id {
        Some(id) => Either::Left(view! { <SessionDetail session_id=id/> }),
        None => Either::Right(view! { <NotFoundPage/> }),
    }
}

#[component]
fn SessionDetail(session_id: i64) -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let session = expect_context::<SessionStore>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();

    let controller: Arc<Controller> = Arc::new(ParticipationController::new(api, session, session_id));

    let detail = RwSignal::new(None::<Result<Session, ApiError>>);
    let teacher = RwSignal::new(None::<Result<Teacher, ApiError>>);
    let participating = RwSignal::new(false);
    let action_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let subscriptions = vec![
        controller.detail().subscribe(move |value| detail.set(Some(value.clone()))),
        controller.teacher().subscribe(move |value| teacher.set(Some(value.clone()))),
        controller.participating().subscribe(move |value| participating.set(*value)),
    ];

    let driver = Arc::clone(&controller);
    Effect::new(move || {
        let driver = Arc::clone(&driver);
        leptos::task::spawn_local(async move { driver.run().await });
    });

    let teardown = Arc::clone(&controller);
    on_cleanup(move || {
        teardown.deactivate();
        drop(subscriptions);
    });

    let run_action = {
        let controller = Arc::clone(&controller);
        move |action: DetailAction| {
            if busy.get_untracked() {
                return;
            }
            busy.set(true);
            action_error.set(None);
            let controller = Arc::clone(&controller);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = match action {
                    DetailAction::Participate => controller.participate().await,
                    DetailAction::UnParticipate => controller.un_participate().await,
                    DetailAction::Delete => {
                        let outcome = controller.delete(&navigate).await;
                        if outcome.is_ok() {
                            show_notice(ui, "Session deleted !");
                        }
                        outcome
                    }
                };
                if let Err(e) = result {
                    log::warn!("session detail: {action:?} failed for session {session_id}: {e}");
                    action_error.set(Some(e.to_string()));
                }
                busy.set(false);
            });
        }
    };

    let is_admin = controller.is_admin();
    let on_participate = {
        let run_action = run_action.clone();
        move |_| run_action(DetailAction::Participate)
    };
    let on_un_participate = {
        let run_action = run_action.clone();
        move |_| run_action(DetailAction::UnParticipate)
    };
    let on_delete = move |_| run_action(DetailAction::Delete);

    view! {
        <div class="session-detail">
            <a href="/sessions" class="session-detail__back" title="Back to sessions">"←"</a>
            {move || match detail.get() {
                None => view! { <p class="session-detail__status">"Loading..."</p> }.into_any(),
                Some(Err(_)) => view! { <p class="session-detail__status">"An error occurred"</p> }.into_any(),
                Some(Ok(session)) => {
                    view! {
                        <article class="session-detail__body">
                            <h1>{session.name.clone()}</h1>
                            <p class="session-detail__teacher">{move || teacher_label(teacher.get().as_ref())}</p>
                            <p class="session-detail__attendees">{attendee_label(session.users.len())}</p>
                            <p class="session-detail__date">{long_date(&session.date)}</p>
                            <p class="session-detail__description">{session.description.clone()}</p>
                            <p class="session-detail__meta">
                                "Created " {long_date(session.created_at.as_deref().unwrap_or_default())}
                                " · Updated " {long_date(session.updated_at.as_deref().unwrap_or_default())}
                            </p>
                        </article>
                    }
                        .into_any()
                }
            }}
            <div class="session-detail__actions">
                <button
                    class="btn btn--danger"
                    hidden=!is_admin
                    disabled=move || busy.get()
                    on:click=on_delete
                >
                    "Delete"
                </button>
                <button
                    class="btn"
                    hidden=move || is_admin || participating.get()
                    disabled=move || busy.get()
                    on:click=on_participate
                >
                    "Participate"
                </button>
                <button
                    class="btn"
                    hidden=move || is_admin || !participating.get()
                    disabled=move || busy.get()
                    on:click=on_un_participate
                >
                    "Do not participate"
                </button>
            </div>
            <Show when=move || action_error.get().is_some()>
                <p class="session-detail__error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}

#[derive(Clone, Copy, Debug)]
enum DetailAction {
    Participate,
    UnParticipate,
    Delete,
}
