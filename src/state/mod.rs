//! Client-side application state.
//!
//! DESIGN
//! ======
//! `session` owns the persisted identity and the login signal. Every
//! long-lived signal is a `broadcast`, a replaying observable.
//!
//! `auth` and `ui` are plain snapshots held in Leptos `RwSignal`s for
//! rendering. `participation` drives the session detail view.

pub mod auth;
pub mod broadcast;
pub mod participation;
pub mod session;
pub mod ui;
