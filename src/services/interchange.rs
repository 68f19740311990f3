//! Import/export of the user collection as JSON files.
//!
//! Imports reuse the persistence codec's per-record normalization; only the
//! batch shape (valid JSON, top-level array) is a hard failure. Exports carry
//! the user collection only, since the seed is rebuilt from code.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use crate::services::persistence_codec;
use crate::types::bookmark::{self, Bookmark};
use crate::types::errors::InterchangeError;

/// Result of validating an import payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub accepted: Vec<Bookmark>,
    pub rejected: usize,
}

impl ImportOutcome {
    /// True when no element survived validation. Distinct from a batch error.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Parses and validates an import payload.
///
/// # Errors
/// `ParseError` for invalid JSON, `NotAnArray` for any other top-level shape.
/// Invalid elements are counted in `rejected`, never raised.
pub fn import_batch(raw: &str) -> Result<ImportOutcome, InterchangeError> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|e| InterchangeError::ParseError(e.to_string()))?;
    let items = parsed.as_array().ok_or(InterchangeError::NotAnArray)?;

    let (accepted, rejected) = persistence_codec::normalize_all(items, bookmark::now());
    debug!(accepted = accepted.len(), rejected, "validated import batch");
    Ok(ImportOutcome { accepted, rejected })
}

/// Merges imported bookmarks into the user collection.
///
/// Imported records win on id collision. The result lists the imported
/// records first (first occurrence per id), then the untouched user records.
pub fn merge_imported(user: &[Bookmark], imported: Vec<Bookmark>) -> Vec<Bookmark> {
    let mut seen: HashSet<String> = HashSet::with_capacity(imported.len());
    let mut merged: Vec<Bookmark> = imported
        .into_iter()
        .filter(|b| seen.insert(b.id.clone()))
        .collect();
    merged.extend(user.iter().filter(|b| !seen.contains(&b.id)).cloned());
    merged
}

/// Pretty-printed JSON array of the user collection.
pub fn export_snapshot(user: &[Bookmark]) -> Result<String, InterchangeError> {
    serde_json::to_string_pretty(user).map_err(|e| InterchangeError::SerializationError(e.to_string()))
}

/// Suggested download name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("til-bookmarks-{}.json", date.format("%Y-%m-%d"))
}

/// Reads an import file without blocking the caller's thread.
pub async fn read_import_file(path: &Path) -> Result<String, InterchangeError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| InterchangeError::IoError(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), bytes = text.len(), "read import file");
    Ok(text)
}

/// Writes an export snapshot to `path`, creating parent directories.
pub async fn write_export_file(path: &Path, snapshot: &str) -> Result<(), InterchangeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| InterchangeError::IoError(format!("{}: {}", parent.display(), e)))?;
    }
    tokio::fs::write(path, snapshot)
        .await
        .map_err(|e| InterchangeError::IoError(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), "wrote export file");
    Ok(())
}
