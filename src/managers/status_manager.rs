//! Status board: the single auto-dismissing message shown after an operation.

use chrono::{DateTime, Utc};

use crate::types::settings::StatusSettings;
use crate::types::status::{StatusKind, StatusMessage};

/// Holds the most recent status message. Posting replaces it.
pub struct StatusManager {
    settings: StatusSettings,
    current: Option<StatusMessage>,
}

impl StatusManager {
    pub fn new(settings: StatusSettings) -> Self {
        Self {
            settings,
            current: None,
        }
    }

    pub fn update_settings(&mut self, settings: StatusSettings) {
        self.settings = settings;
    }

    pub fn post_success(&mut self, text: impl Into<String>) -> &StatusMessage {
        self.post_at(StatusKind::Success, text.into(), Utc::now())
    }

    pub fn post_error(&mut self, text: impl Into<String>) -> &StatusMessage {
        self.post_at(StatusKind::Error, text.into(), Utc::now())
    }

    /// Posts a message as of `now`. Errors dwell longer than successes.
    pub fn post_at(&mut self, kind: StatusKind, text: String, now: DateTime<Utc>) -> &StatusMessage {
        let dwell_ms = match kind {
            StatusKind::Success => self.settings.success_dwell_ms,
            StatusKind::Error => self.settings.error_dwell_ms,
        };
        self.current.insert(StatusMessage {
            kind,
            text,
            posted_at: now,
            dwell_ms,
        })
    }

    /// The message visible at `now`, if it has not yet been dismissed.
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<&StatusMessage> {
        self.current.as_ref().filter(|m| m.is_visible_at(now))
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current_at(Utc::now())
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
