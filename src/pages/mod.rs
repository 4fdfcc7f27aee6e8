//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetch, validate, navigate) and
//! keeps its input checks in plain functions so they are tested natively.

pub mod login;
pub mod me;
pub mod not_found;
pub mod register;
pub mod session_detail;
pub mod session_form;
pub mod sessions;
