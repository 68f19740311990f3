//! Draft cache for the add-bookmark form.
//!
//! One slot, overwritten on every save. Restoring overlays the stored fields
//! onto a caller-supplied baseline one field at a time, so a partial draft
//! never clears fields it does not mention.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::database::connection::Database;
use crate::database::KeyValueStore;
use crate::types::draft::DraftFields;
use crate::types::errors::{DraftError, StoreError};

/// Store key holding the in-progress form.
pub const DRAFT_KEY: &str = "til-bookmarks-draft";

/// Trait defining draft cache operations.
pub trait DraftManagerTrait {
    fn save_draft(&self, fields: &DraftFields) -> Result<(), DraftError>;
    /// Returns `baseline` with every stored string field applied on top.
    ///
    /// # Errors
    /// `DraftError::Corrupted` when the slot holds something other than a JSON object.
    fn load_draft(&self, baseline: &DraftFields) -> Result<DraftFields, DraftError>;
    fn clear_draft(&self) -> Result<(), DraftError>;
    fn has_draft(&self) -> Result<bool, DraftError>;
}

/// Draft cache backed by the key-value store.
pub struct DraftManager {
    db: Arc<Database>,
}

impl DraftManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn overlay(target: &mut String, stored: &Map<String, Value>, field: &str) {
        if let Some(value) = stored.get(field).and_then(Value::as_str) {
            *target = value.to_string();
        }
    }
}

impl DraftManagerTrait for DraftManager {
    fn save_draft(&self, fields: &DraftFields) -> Result<(), DraftError> {
        let json = serde_json::to_string(fields)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.db.set(DRAFT_KEY, &json)?;
        debug!("saved draft");
        Ok(())
    }

    fn load_draft(&self, baseline: &DraftFields) -> Result<DraftFields, DraftError> {
        let Some(raw) = self.db.get(DRAFT_KEY)? else {
            return Ok(baseline.clone());
        };

        let parsed: Value = serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "stored draft is not valid JSON");
            DraftError::Corrupted(e.to_string())
        })?;
        let Some(stored) = parsed.as_object() else {
            warn!("stored draft is not a JSON object");
            return Err(DraftError::Corrupted("expected a JSON object".to_string()));
        };

        let mut fields = baseline.clone();
        Self::overlay(&mut fields.title, stored, "title");
        Self::overlay(&mut fields.url, stored, "url");
        Self::overlay(&mut fields.tags, stored, "tags");
        Self::overlay(&mut fields.note, stored, "note");
        Ok(fields)
    }

    fn clear_draft(&self) -> Result<(), DraftError> {
        self.db.remove(DRAFT_KEY)?;
        Ok(())
    }

    fn has_draft(&self) -> Result<bool, DraftError> {
        Ok(self.db.get(DRAFT_KEY)?.is_some())
    }
}
