//! Route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes (sessions, account) sit behind [`RequireAuth`]; the login
//! and register routes sit behind [`RequireGuest`]. Both resolve the login
//! signal exactly once per navigation with a one-shot subscription, so a
//! guard never keeps listening and never waits: the signal always carries a
//! current value.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::either::Either;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::broadcast::Broadcast;
use crate::state::session::SessionStore;

pub const LOGIN_ROUTE: &str = "/login";
pub const HOME_ROUTE: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allowed,
    Denied,
}

/// Outcome of one guard evaluation plus the redirect it requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardDecision {
    pub outcome: GuardOutcome,
    pub redirect_to: Option<&'static str>,
}

impl GuardDecision {
    const fn allow() -> Self {
        Self { outcome: GuardOutcome::Allowed, redirect_to: None }
    }

    const fn deny(redirect_to: &'static str) -> Self {
        Self { outcome: GuardOutcome::Denied, redirect_to: Some(redirect_to) }
    }

    pub fn is_allowed(self) -> bool {
        self.outcome == GuardOutcome::Allowed
    }
}

/// Redirects replace the denied history entry.
fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Decide access to an authenticated-only route.
pub fn decide_logged_in(is_logged: &Broadcast<bool>) -> GuardDecision {
    if is_logged.first().unwrap_or(false) {
        GuardDecision::allow()
    } else {
        GuardDecision::deny(LOGIN_ROUTE)
    }
}

/// Decide access to a guest-only route (login, register).
pub fn decide_logged_out(is_logged: &Broadcast<bool>) -> GuardDecision {
    if is_logged.first().unwrap_or(false) {
        GuardDecision::deny(HOME_ROUTE)
    } else {
        GuardDecision::allow()
    }
}

fn apply<F>(decision: GuardDecision, navigate: F) -> GuardOutcome
where
    F: Fn(&str, NavigateOptions),
{
    if let Some(path) = decision.redirect_to {
        log::debug!("guard: redirecting to {path}");
        navigate(path, redirect_options());
    }
    decision.outcome
}

/// Authenticated-only guard: redirect to `/login` and deny when logged out.
pub fn require_logged_in<F>(is_logged: &Broadcast<bool>, navigate: F) -> GuardOutcome
where
    F: Fn(&str, NavigateOptions),
{
    apply(decide_logged_in(is_logged), navigate)
}

/// Guest-only guard: redirect to `/` and deny when logged in.
pub fn require_logged_out<F>(is_logged: &Broadcast<bool>, navigate: F) -> GuardOutcome
where
    F: Fn(&str, NavigateOptions),
{
    apply(decide_logged_out(is_logged), navigate)
}

/// Issue the decision's redirect once the router is mounted.
fn install_guard_redirect<F>(decision: GuardDecision, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    if decision.redirect_to.is_some() {
        Effect::new(move || {
            apply(decision, &navigate);
        });
    }
}

/// Render `children` only for logged-in users.
#[component]
pub fn RequireAuth(children: Children) -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let decision = decide_logged_in(session.is_logged());
    install_guard_redirect(decision, use_navigate());

    if decision.is_allowed() { Either::Left(children()) } else { Either::Right(()) }
}

/// Render `children` only for visitors who are not logged in.
#[component]
pub fn RequireGuest(children: Children) -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let decision = decide_logged_out(session.is_logged());
    install_guard_redirect(decision, use_navigate());

    if decision.is_allowed() { Either::Left(children()) } else { Either::Right(()) }
}
