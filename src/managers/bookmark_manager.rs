//! Bookmark Manager for tilmarks.
//!
//! Session-scoped owner of the user collection: loads it once from the store,
//! persists it after every mutation, and serves the reconciled view together
//! with the seed collection.

use std::sync::Arc;

use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::database::connection::Database;
use crate::services::{filter_index, interchange, persistence_codec, reconciler, url_classifier};
use crate::types::bookmark::{self, parse_tag_list, Bookmark, BookmarkFilter};
use crate::types::draft::DraftFields;
use crate::types::errors::BookmarkError;

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub accepted: usize,
    pub rejected: usize,
}

impl ImportReport {
    /// True when nothing in the batch was usable.
    pub fn is_empty(&self) -> bool {
        self.accepted == 0
    }
}

/// Trait defining bookmark collection operations.
pub trait BookmarkManagerTrait {
    /// Loads the user collection from the store. Only the first call reads;
    /// later calls return the cached count.
    fn load(&mut self) -> Result<usize, BookmarkError>;
    /// Validates a form submission and saves it as a new bookmark.
    fn add_bookmark(&mut self, form: &DraftFields) -> Result<Bookmark, BookmarkError>;
    /// Imports a JSON payload; imported records replace user records with the same id.
    fn import_text(&mut self, raw: &str) -> Result<ImportReport, BookmarkError>;
    /// Pretty JSON snapshot of the user collection.
    fn export_text(&self) -> Result<String, BookmarkError>;
    fn user_bookmarks(&self) -> &[Bookmark];
    fn seed_bookmarks(&self) -> &[Bookmark];
    /// Seed and user collections reconciled and sorted newest first.
    fn combined(&self) -> Vec<Bookmark>;
    /// Combined view narrowed by search text and tag.
    fn filtered(&self, filter: &BookmarkFilter) -> Vec<Bookmark>;
    /// Every tag present in the combined view.
    fn tags(&self) -> Vec<String>;
}

/// Bookmark manager backed by the key-value store.
pub struct BookmarkManager {
    db: Arc<Database>,
    seed: Vec<Bookmark>,
    user: Vec<Bookmark>,
    loaded: bool,
}

impl BookmarkManager {
    /// Creates a manager over `db` with the given seed collection. Call
    /// [`BookmarkManagerTrait::load`] before reading.
    pub fn new(db: Arc<Database>, seed: Vec<Bookmark>) -> Self {
        Self {
            db,
            seed,
            user: Vec::new(),
            loaded: false,
        }
    }

    /// Writes `next` to the store and adopts it only once the write succeeds,
    /// so a failed save leaves memory matching the store.
    fn commit(&mut self, next: Vec<Bookmark>) -> Result<(), BookmarkError> {
        persistence_codec::save(&self.db, &next)?;
        self.user = next;
        Ok(())
    }

    /// Builds a bookmark from form values.
    fn bookmark_from_form(form: &DraftFields) -> Result<Bookmark, BookmarkError> {
        let title = form.title.trim();
        if title.is_empty() {
            return Err(BookmarkError::InvalidTitle);
        }
        let url = form.url.trim();
        if url.is_empty() {
            return Err(BookmarkError::InvalidUrl("URL is required".to_string()));
        }
        Url::parse(url).map_err(|e| BookmarkError::InvalidUrl(format!("{}: {}", url, e)))?;

        Ok(Bookmark {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            url: url.to_string(),
            url_type: url_classifier::classify(url),
            tags: parse_tag_list(&form.tags),
            note: form.note.trim().to_string(),
            saved_at: bookmark::now(),
        })
    }
}

impl BookmarkManagerTrait for BookmarkManager {
    fn load(&mut self) -> Result<usize, BookmarkError> {
        if !self.loaded {
            self.user = persistence_codec::load(&self.db)?;
            self.loaded = true;
        }
        Ok(self.user.len())
    }

    fn add_bookmark(&mut self, form: &DraftFields) -> Result<Bookmark, BookmarkError> {
        let bookmark = Self::bookmark_from_form(form)?;
        let mut next = Vec::with_capacity(self.user.len() + 1);
        next.push(bookmark.clone());
        next.extend(self.user.iter().cloned());
        self.commit(next)?;
        info!(id = %bookmark.id, url_type = %bookmark.url_type, "added bookmark");
        Ok(bookmark)
    }

    fn import_text(&mut self, raw: &str) -> Result<ImportReport, BookmarkError> {
        let outcome = interchange::import_batch(raw)?;
        let report = ImportReport {
            accepted: outcome.accepted.len(),
            rejected: outcome.rejected,
        };
        if outcome.is_empty() {
            return Ok(report);
        }

        let merged = interchange::merge_imported(&self.user, outcome.accepted);
        self.commit(merged)?;
        info!(accepted = report.accepted, rejected = report.rejected, "imported bookmarks");
        Ok(report)
    }

    fn export_text(&self) -> Result<String, BookmarkError> {
        Ok(interchange::export_snapshot(&self.user)?)
    }

    fn user_bookmarks(&self) -> &[Bookmark] {
        &self.user
    }

    fn seed_bookmarks(&self) -> &[Bookmark] {
        &self.seed
    }

    fn combined(&self) -> Vec<Bookmark> {
        reconciler::combine(&self.seed, &self.user)
    }

    fn filtered(&self, filter: &BookmarkFilter) -> Vec<Bookmark> {
        let combined = self.combined();
        filter_index::filter(&combined, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    fn tags(&self) -> Vec<String> {
        reconciler::derive_tags(&self.combined())
    }
}
