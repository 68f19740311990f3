//! App Core for tilmarks.
//!
//! Owns the store, the bookmark session, the draft cache, settings, and the
//! status board, and turns operation outcomes into status messages.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::database::connection::Database;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait, ImportReport};
use crate::managers::draft_manager::{DraftManager, DraftManagerTrait};
use crate::managers::status_manager::StatusManager;
use crate::platform;
use crate::seed::seed_bookmarks;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::bookmark::{Bookmark, BookmarkFilter};
use crate::types::draft::DraftFields;
use crate::types::errors::{AppError, BookmarkError, SettingsError, SummaryError};
use crate::types::summary::PageSummary;

/// Flag marking a latent operation as running. Owned by the caller so a
/// repeated request can be refused while the first is pending.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    /// Marks the operation as started, or returns `None` if it already is.
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(self.0.clone()))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears its flag when dropped.
#[derive(Debug)]
pub struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Central application struct.
pub struct App {
    pub db: Arc<Database>,
    pub bookmarks: BookmarkManager,
    pub drafts: DraftManager,
    pub settings_engine: SettingsEngine,
    pub status: StatusManager,
    pub import_flag: InFlight,
    pub autofill_flag: InFlight,
}

impl App {
    /// Opens the database at `db_path`, loads settings (from `settings_path`
    /// or the platform config dir), and loads the user collection.
    ///
    /// # Errors
    /// Any failure here is fatal for startup.
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, AppError> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        let settings = settings_engine.load()?;

        let db = Arc::new(Database::open(db_path)?);
        let mut bookmarks = BookmarkManager::new(db.clone(), seed_bookmarks());
        let count = bookmarks.load()?;
        info!(db = db_path, user_bookmarks = count, "application started");

        Ok(Self {
            drafts: DraftManager::new(db.clone()),
            status: StatusManager::new(settings.status),
            db,
            bookmarks,
            settings_engine,
            import_flag: InFlight::default(),
            autofill_flag: InFlight::default(),
        })
    }

    /// Starts from settings alone: the database path comes from
    /// `storage.database_path` or defaults to the platform data dir.
    pub fn from_settings(settings_path: Option<String>) -> Result<Self, AppError> {
        let mut engine = SettingsEngine::new(settings_path.clone());
        let db_path = match engine.load()?.storage.database_path {
            Some(path) => PathBuf::from(path),
            None => platform::default_database_path(),
        };
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create data directory: {}", e))
            })?;
        }
        Self::new(&db_path.to_string_lossy(), settings_path)
    }

    /// Saves a submitted form as a bookmark. On success the draft is cleared.
    pub fn submit_form(&mut self, form: &DraftFields) -> Result<Bookmark, BookmarkError> {
        match self.bookmarks.add_bookmark(form) {
            Ok(bookmark) => {
                if let Err(e) = self.drafts.clear_draft() {
                    warn!(error = %e, "failed to clear draft after save");
                }
                self.status.post_success(format!("Saved \"{}\"", bookmark.title));
                Ok(bookmark)
            }
            Err(e) => {
                self.status.post_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Imports a JSON payload and reports the outcome on the status board.
    pub fn import_text(&mut self, raw: &str) -> Result<ImportReport, BookmarkError> {
        match self.bookmarks.import_text(raw) {
            Ok(report) if report.is_empty() => {
                self.status.post_error("No valid bookmarks found in file");
                Ok(report)
            }
            Ok(report) => {
                let skipped = if report.rejected > 0 {
                    format!(" ({} skipped)", report.rejected)
                } else {
                    String::new()
                };
                self.status
                    .post_success(format!("Imported {} bookmarks{}", report.accepted, skipped));
                Ok(report)
            }
            Err(e) => {
                self.status.post_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Snapshot of the user collection for download.
    pub fn export_text(&mut self) -> Result<String, BookmarkError> {
        let snapshot = self.bookmarks.export_text();
        match &snapshot {
            Ok(_) => {
                let count = self.bookmarks.user_bookmarks().len();
                self.status.post_success(format!("Exported {} bookmarks", count));
            }
            Err(e) => {
                self.status.post_error(e.to_string());
            }
        }
        snapshot
    }

    /// Persists the form as typed. Failures are logged, not surfaced.
    pub fn save_draft(&mut self, fields: &DraftFields) {
        if let Err(e) = self.drafts.save_draft(fields) {
            warn!(error = %e, "failed to save draft");
        }
    }

    /// Restores the saved draft over `baseline`. A corrupted draft posts an
    /// error and yields `baseline`.
    pub fn restore_draft(&mut self, baseline: &DraftFields) -> DraftFields {
        match self.drafts.load_draft(baseline) {
            Ok(fields) => fields,
            Err(e) => {
                self.status.post_error("Could not restore the saved draft");
                warn!(error = %e, "draft restore failed");
                baseline.clone()
            }
        }
    }

    /// Applies an auto-fill result to `form` and posts the outcome.
    pub fn apply_summary(
        &mut self,
        form: &DraftFields,
        result: Result<PageSummary, SummaryError>,
    ) -> Result<DraftFields, SummaryError> {
        match result {
            Ok(summary) => {
                let mut filled = form.clone();
                filled.apply_summary(&summary);
                self.save_draft(&filled);
                self.status.post_success("Filled in summary and tags");
                Ok(filled)
            }
            Err(e) => {
                self.status.post_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Combined view narrowed by `filter`.
    pub fn view(&self, filter: &BookmarkFilter) -> Vec<Bookmark> {
        self.bookmarks.filtered(filter)
    }

    pub fn tags(&self) -> Vec<String> {
        self.bookmarks.tags()
    }
}
