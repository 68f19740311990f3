use tilmarks::types::errors::*;

// === StoreError Tests ===

#[test]
fn store_error_from_rusqlite() {
    let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StoreError::DatabaseError(_)));
    assert!(err.to_string().starts_with("Store database error:"));
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(BookmarkError::InvalidTitle.to_string(), "Title is required");
    assert_eq!(
        BookmarkError::InvalidUrl("nope".to_string()).to_string(),
        "Invalid URL: nope"
    );
}

#[test]
fn bookmark_error_wraps_interchange_transparently() {
    let err: BookmarkError = InterchangeError::NotAnArray.into();
    assert_eq!(
        err.to_string(),
        "Import file must contain a JSON array of bookmarks"
    );
}

#[test]
fn bookmark_error_wraps_store_transparently() {
    let err: BookmarkError = StoreError::SerializationError("boom".to_string()).into();
    assert_eq!(err.to_string(), "Store serialization error: boom");
}

// === InterchangeError Tests ===

#[test]
fn interchange_error_display_variants() {
    assert_eq!(
        InterchangeError::ParseError("EOF".to_string()).to_string(),
        "Import file is not valid JSON: EOF"
    );
    assert_eq!(
        InterchangeError::IoError("missing".to_string()).to_string(),
        "Interchange file error: missing"
    );
}

// === DraftError Tests ===

#[test]
fn draft_error_corrupted_display() {
    let err = DraftError::Corrupted("expected a JSON object".to_string());
    assert_eq!(err.to_string(), "Saved draft is corrupted: expected a JSON object");
}

// === SummaryError Tests ===

#[test]
fn summary_error_display_variants() {
    assert_eq!(
        SummaryError::MissingCredential("OPENAI_API_KEY".to_string()).to_string(),
        "Missing API key: set the OPENAI_API_KEY environment variable"
    );
    assert_eq!(
        SummaryError::TooLittleContent { found: 12, required: 150 }.to_string(),
        "Not enough readable text on the page (12 characters, need 150)"
    );
}

// === AppError Tests ===

#[test]
fn app_error_from_settings_error() {
    let err: AppError = SettingsError::InvalidKey("x".to_string()).into();
    assert_eq!(err.to_string(), "Invalid settings key: x");
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(BookmarkError::InvalidTitle);
    assert!(err.source().is_none());
}
