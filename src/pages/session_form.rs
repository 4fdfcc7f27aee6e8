//! Create / update form for sessions (admins only).

#[cfg(test)]
#[path = "session_form_test.rs"]
mod session_form_test;

use leptos::either::Either;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::app::BrowserApi;
use crate::components::notice::show_notice;
use crate::net::api::SessionDetailApi;
use crate::net::types::{SessionForm, Teacher};
use crate::pages::session_detail::parse_session_id;
use crate::state::participation::SESSIONS_ROUTE;
use crate::state::session::SessionStore;
use crate::state::ui::UiState;
use crate::util::format::{full_name, input_date};

pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Whether the form creates a new session or edits an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(i64),
}

impl FormMode {
    /// `None` when an update route carries an unusable id.
    pub fn from_route(is_update: bool, raw_id: Option<&str>) -> Option<Self> {
        if is_update { parse_session_id(raw_id).map(Self::Update) } else { Some(Self::Create) }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Create => "Create session",
            Self::Update(_) => "Update session",
        }
    }

    pub fn success_notice(self) -> &'static str {
        match self {
            Self::Create => "Session created !",
            Self::Update(_) => "Session updated !",
        }
    }
}

pub fn validate_session_form(
    name: &str,
    date: &str,
    teacher_id: &str,
    description: &str,
) -> Result<SessionForm, &'static str> {
    let name = name.trim();
    let date = date.trim();
    let description = description.trim();
    if name.is_empty() || date.is_empty() || teacher_id.trim().is_empty() || description.is_empty() {
        return Err("All fields are required.");
    }
    if input_date(date).is_empty() {
        return Err("Date is not valid.");
    }
    let Ok(teacher_id) = teacher_id.trim().parse::<i64>() else {
        return Err("Select a teacher.");
    };
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err("Description must be at most 2000 characters.");
    }
    Ok(SessionForm {
        name: name.to_owned(),
        date: date.to_owned(),
        teacher_id,
        description: description.to_owned(),
    })
}

#[component]
pub fn SessionFormPage(#[prop(optional)] update: bool) -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let params = use_params_map();
    let navigate = use_navigate();

    let mode = params.with_untracked(|p| FormMode::from_route(update, p.get("id").as_deref()));
    let target = match mode {
        Some(_) if !session.is_admin() => Some(SESSIONS_ROUTE),
        Some(_) => None,
        None => Some("/404"),
    };

    if let Some(path) = target {
        Effect::new(move || navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() }));
    }
    match mode {
        Some(mode) if target.is_none() => Either::Left(view! { <SessionFormView mode=mode/> }),
        _ => Either::Right(()),
    }
}

#[component]
fn SessionFormView(mode: FormMode) -> impl IntoView {
    let api = expect_context::<BrowserApi>();
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let teacher_id = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let teachers = RwSignal::new(Vec::<Teacher>::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let loader = api.clone();
    Effect::new(move || {
        let api = loader.clone();
        leptos::task::spawn_local(async move {
            match api.teachers().await {
                Ok(list) => teachers.set(list),
                Err(e) => log::warn!("session form: teacher list failed: {e}"),
            }
            if let FormMode::Update(id) = mode {
                match api.session_detail(id).await {
                    Ok(existing) => {
                        name.set(existing.name);
                        date.set(input_date(&existing.date));
                        teacher_id.set(existing.teacher_id.to_string());
                        description.set(existing.description);
                    }
                    Err(e) => {
                        log::warn!("session form: could not load session {id}: {e}");
                        info.set("An error occurred".to_owned());
                    }
                }
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = match validate_session_form(&name.get(), &date.get(), &teacher_id.get(), &description.get()) {
            Ok(form) => form,
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
            let result = match mode {
                FormMode::Create => api.create_session(&form).await,
                FormMode::Update(id) => api.update_session(id, &form).await,
            };
            match result {
                Ok(_) => {
                    show_notice(ui, mode.success_notice());
                    navigate(SESSIONS_ROUTE, NavigateOptions::default());
                }
                Err(e) => {
                    log::warn!("session form: save failed: {e}");
                    info.set("An error occurred".to_owned());
                }
            }
            busy.set(false);
        });
    };

    let remaining = move || DESCRIPTION_MAX_CHARS.saturating_sub(description.get().chars().count());

    view! {
        <div class="session-form">
            <a href="/sessions" class="session-form__back" title="Back to sessions">"←"</a>
            <h1>{mode.title()}</h1>
            <form class="session-form__fields" on:submit=on_submit>
                <input
                    class="login-input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="date"
                    prop:value=move || date.get()
                    on:input=move |ev| date.set(event_target_value(&ev))
                />
                <select
                    class="login-input"
                    prop:value=move || teacher_id.get()
                    on:change=move |ev| teacher_id.set(event_target_value(&ev))
                >
                    <option value="">"Teacher"</option>
                    <For
                        each=move || teachers.get()
                        key=|teacher| teacher.id
                        children=move |teacher: Teacher| {
                            view! {
                                <option value=teacher.id.to_string()>
                                    {full_name(&teacher.first_name, &teacher.last_name)}
                                </option>
                            }
                        }
                    />
                </select>
                <textarea
                    class="login-input"
                    placeholder="Description"
                    maxlength=DESCRIPTION_MAX_CHARS.to_string()
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                <p class="session-form__counter">{remaining} " characters left"</p>
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Save"
                </button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="login-message">{move || info.get()}</p>
            </Show>
        </div>
    }
}
