use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const MAX_DWELL_MS: u64 = 86_400_000;

/// Whether a status message reports success or a recoverable error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// A short, auto-dismissing status line shown after an operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub posted_at: DateTime<Utc>,
    pub dwell_ms: u64,
}

impl StatusMessage {
    /// Instant at which the message is dismissed.
    pub fn expires_at(&self) -> DateTime<Utc> {
        // Capped at one day.
        let dwell = self.dwell_ms.min(MAX_DWELL_MS) as i64;
        self.posted_at + Duration::milliseconds(dwell)
    }

    /// True while the message should still be displayed.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }
}
