use serde::{Deserialize, Serialize};

use super::summary::PageSummary;

/// Values of the add-bookmark form, as typed.
///
/// `tags` is the raw comma-separated field; it is split only when the form is
/// submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DraftFields {
    pub title: String,
    pub url: String,
    pub tags: String,
    pub note: String,
}

impl DraftFields {
    /// Prefills the form from an auto-fill result: the summary becomes the
    /// note and the suggested tags replace the tag field.
    pub fn apply_summary(&mut self, summary: &PageSummary) {
        self.note = summary.summary.clone();
        self.tags = summary.tags.clone();
    }
}
