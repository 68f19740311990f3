use serde::{Deserialize, Serialize};

/// Result of the auto-fill summarizer for one page.
///
/// `tags` is a comma-separated list, ready to drop into the form's tag field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PageSummary {
    pub summary: String,
    pub tags: String,
}
