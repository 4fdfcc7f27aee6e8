//! # yoga-client
//!
//! Leptos + WASM frontend for the yoga studio booking application.
//!
//! The crate owns the client-side authentication state (`state::session`),
//! the route guards built on it (`util::auth`), the request authenticator that
//! stamps every API call with the stored bearer credential
//! (`net::interceptor`), and the refresh controller behind the session detail
//! view (`state::participation`). Pages and components are thin Leptos views
//! over those pieces.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and hydrate the server-rendered
/// shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let config = config::ClientConfig::from_build_env();
    if console_log::init_with_level(config.log_level).is_err() {
        log::warn!("hydrate: a logger was already installed");
    }
    log::info!("hydrate: api base {}", config.api_base_url);
    leptos::mount::hydrate_body(app::App);
}
