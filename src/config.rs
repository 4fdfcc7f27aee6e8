//! Client configuration baked in at build time.
//!
//! Values come from compile-time environment variables because the WASM
//! bundle has no process environment:
//!
//! - `YOGA_API_BASE_URL`: REST base URL, default `/api`
//! - `YOGA_LOG_LEVEL`: browser console level (`error`..`trace`), default `info`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub log_level: log::Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned(), log_level: DEFAULT_LOG_LEVEL }
    }
}

impl ClientConfig {
    /// Read the values captured when the crate was compiled.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("YOGA_API_BASE_URL"), option_env!("YOGA_LOG_LEVEL"))
    }

    /// Build config from optional raw values, falling back to defaults for
    /// anything missing or unparseable.
    pub fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url.unwrap_or(DEFAULT_API_BASE_URL)),
            log_level: parse_log_level(log_level),
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn parse_log_level(raw: Option<&str>) -> log::Level {
    raw.and_then(|v| v.trim().parse::<log::Level>().ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}
