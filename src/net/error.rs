//! Errors surfaced by the REST client.
//!
//! ERROR HANDLING
//! ==============
//! Nothing in the client retries. Every failure is returned to the nearest
//! caller, which decides what the user sees. The type is `Clone` so a failed
//! fetch can be broadcast to several observers.

use super::types::ErrorBody;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid request body: {0}")]
    Encode(String),
    #[error("no authenticated session")]
    NotAuthenticated,
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Build a status error, preferring the server's `message` field over the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| body.trim().to_owned());
        Self::Status { status, message }
    }

    /// HTTP status for server rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
