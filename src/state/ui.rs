//! Transient UI chrome state.
//!
//! DESIGN
//! ======
//! Keeps presentation-only concerns (the flash notice after a save) out of
//! the session store so pages can post a message and navigate away in the
//! same handler.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// How long a notice stays on screen.
pub const NOTICE_TIMEOUT_MS: u32 = 3_000;

/// UI state shared through context as `RwSignal<UiState>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub notice: Option<String>,
    /// Bumped on every new notice so a stale dismiss timer can tell it lost.
    pub notice_seq: u64,
}

impl UiState {
    pub fn show_notice(&mut self, message: impl Into<String>) -> u64 {
        self.notice_seq += 1;
        self.notice = Some(message.into());
        self.notice_seq
    }

    /// Clear the notice only if it is still the one numbered `seq`.
    pub fn dismiss_notice(&mut self, seq: u64) -> bool {
        if self.notice_seq != seq || self.notice.is_none() {
            return false;
        }
        self.notice = None;
        true
    }
}
