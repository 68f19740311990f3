use thiserror::Error;

// === StoreError ===

/// Errors raised by the key-value store itself.
///
/// Malformed stored content is never a `StoreError`; it is normalized away by
/// the persistence codec.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("Store database error: {0}")]
    DatabaseError(String),
    /// A value could not be serialized for writing.
    #[error("Store serialization error: {0}")]
    SerializationError(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

// === BookmarkError ===

/// Errors related to bookmark collection operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// The submitted title is empty.
    #[error("Title is required")]
    InvalidTitle,
    /// The submitted URL is empty or not an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// A whole import batch was rejected.
    #[error(transparent)]
    Interchange(#[from] InterchangeError),
    /// Reading or writing the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// === InterchangeError ===

/// Batch-level import/export failures.
///
/// An import whose elements are all invalid is not an error; it yields an
/// empty outcome.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The payload is not valid JSON.
    #[error("Import file is not valid JSON: {0}")]
    ParseError(String),
    /// The payload is JSON but its top level is not an array.
    #[error("Import file must contain a JSON array of bookmarks")]
    NotAnArray,
    /// The snapshot could not be serialized.
    #[error("Export serialization error: {0}")]
    SerializationError(String),
    /// Reading or writing an interchange file failed.
    #[error("Interchange file error: {0}")]
    IoError(String),
}

// === DraftError ===

/// Errors related to the draft cache.
#[derive(Debug, Error)]
pub enum DraftError {
    /// The stored draft is not a JSON object.
    #[error("Saved draft is corrupted: {0}")]
    Corrupted(String),
    /// Reading or writing the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === SummaryError ===

/// Errors raised by the auto-fill summarizer.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The API key environment variable is unset or empty.
    #[error("Missing API key: set the {0} environment variable")]
    MissingCredential(String),
    /// The article URL is not an absolute http(s) URL.
    #[error("Invalid article URL: {0}")]
    InvalidUrl(String),
    /// Fetching the page or calling the model failed.
    #[error("Summarizer network error: {0}")]
    NetworkError(String),
    /// The page has too little readable text to summarize.
    #[error("Not enough readable text on the page ({found} characters, need {required})")]
    TooLittleContent { found: usize, required: usize },
    /// The model endpoint returned an error status.
    #[error("Summarizer provider error: {0}")]
    ProviderError(String),
    /// The model reply was not the expected JSON object.
    #[error("Unexpected summarizer response: {0}")]
    MalformedResponse(String),
}

// === AppError ===

/// Startup failures. Any of these halts the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The database could not be opened or migrated.
    #[error("Failed to open database: {0}")]
    Database(#[from] rusqlite::Error),
    /// The settings file is unreadable or malformed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The stored collection could not be read.
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),
}
