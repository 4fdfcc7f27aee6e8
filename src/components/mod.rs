//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the application chrome around the routed pages and read
//! shared state from Leptos context providers.

pub mod notice;
pub mod toolbar;
