//! Reactive mirror of the session store for rendering.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read `RwSignal<AuthState>` from context to show or hide the
//! authenticated toolbar links and admin-only actions. The store remains the
//! source of truth; this snapshot is refreshed on every login-state emission.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::SessionStore;

/// Snapshot of the current identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub logged_in: bool,
    pub user_id: Option<i64>,
    pub admin: bool,
    pub display_name: Option<String>,
}

impl AuthState {
    pub fn from_store(store: &SessionStore) -> Self {
        let logged_in = store.is_logged().get().unwrap_or(false);
        let info = if logged_in { store.session_information() } else { None };
        match info {
            Some(info) => Self {
                logged_in,
                user_id: Some(info.id),
                admin: info.admin,
                display_name: Some(format!("{} {}", info.first_name, info.last_name).trim().to_owned()),
            },
            None => Self { logged_in, ..Self::default() },
        }
    }
}
