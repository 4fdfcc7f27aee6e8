//! Session state store: the single owner of "who is logged in".
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards read the login signal, the request authenticator reads the
//! stored credential, and the detail controller reads the identity. Only the
//! login page, the toolbar logout and account deletion call `log_in` /
//! `log_out`.
//!
//! INVARIANTS
//! ==========
//! - The persisted record is the source of truth; `session_information` reads
//!   storage on every call and never caches.
//! - The login signal changes only after the matching storage write succeeded,
//!   inside the same synchronous call, so the two never disagree.
//! - A record that does not parse counts as logged out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use super::broadcast::Broadcast;
use crate::net::types::SessionInformation;
use crate::util::storage::{KeyValueStorage, StorageError};

/// Storage key holding the JSON-encoded [`SessionInformation`].
pub const SESSION_STORAGE_KEY: &str = "session";

/// Shared handle to the authentication state.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    is_logged: Broadcast<bool>,
}

impl SessionStore {
    /// Build the store over `storage`, deriving the initial login state from
    /// whether a well-formed record is present.
    ///
    /// A record that fails to parse counts as logged out and is removed here,
    /// so the slot and the signal agree from the start. This is the one write
    /// to the slot outside [`log_in`](Self::log_in) and
    /// [`log_out`](Self::log_out); if the removal fails the record stays and
    /// is still read as logged out.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let has_session = match read_record(storage.as_ref()) {
            Ok(record) => record.is_some(),
            Err(RecordError::Corrupt(e)) => {
                log::warn!("session: discarding unreadable record: {e}");
                if let Err(e) = storage.remove_item(SESSION_STORAGE_KEY) {
                    log::warn!("session: failed to clear unreadable record: {e}");
                }
                false
            }
            Err(RecordError::Storage(e)) => {
                log::warn!("session: storage unreadable, starting logged out: {e}");
                false
            }
        };

        Self { storage, is_logged: Broadcast::with_value(has_session) }
    }

    /// The persisted session, or `None` when logged out.
    pub fn session_information(&self) -> Option<SessionInformation> {
        match read_record(self.storage.as_ref()) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("session: treating record as absent: {e}");
                None
            }
        }
    }

    /// Persist `info` and announce the logged-in state.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written; the
    /// login signal is left untouched in that case.
    pub fn log_in(&self, info: &SessionInformation) -> Result<(), StorageError> {
        let raw = serde_json::to_string(info).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.storage.set_item(SESSION_STORAGE_KEY, &raw)?;
        log::debug!("session: logged in as user {}", info.id);
        self.is_logged.emit(true);
        Ok(())
    }

    /// Remove the persisted session and announce the logged-out state.
    ///
    /// Calling this while already logged out re-emits `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be removed; nothing is emitted
    /// in that case.
    pub fn log_out(&self) -> Result<(), StorageError> {
        self.storage.remove_item(SESSION_STORAGE_KEY)?;
        log::debug!("session: logged out");
        self.is_logged.emit(false);
        Ok(())
    }

    /// The login signal. New subscribers receive the current state first.
    pub fn is_logged(&self) -> &Broadcast<bool> {
        &self.is_logged
    }

    /// Current id of the authenticated user.
    pub fn user_id(&self) -> Option<i64> {
        self.session_information().map(|info| info.id)
    }

    /// Whether the authenticated user carries the admin flag.
    pub fn is_admin(&self) -> bool {
        self.session_information().is_some_and(|info| info.admin)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("is_logged", &self.is_logged.get())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
enum RecordError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed session record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

fn read_record(storage: &dyn KeyValueStorage) -> Result<Option<SessionInformation>, RecordError> {
    let Some(raw) = storage.get_item(SESSION_STORAGE_KEY)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}
