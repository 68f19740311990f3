//! Unit tests for the BookmarkManager public API.
//!
//! These tests exercise form submission, import/export and the derived views
//! through the `BookmarkManagerTrait` interface, using an in-memory SQLite
//! database.

use std::sync::Arc;

use tilmarks::database::{Database, KeyValueStore};
use tilmarks::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use tilmarks::seed::seed_bookmarks;
use tilmarks::services::persistence_codec::BOOKMARKS_KEY;
use tilmarks::types::bookmark::BookmarkFilter;
use tilmarks::types::draft::DraftFields;
use tilmarks::types::errors::{BookmarkError, InterchangeError};
use tilmarks::types::url_type::UrlType;

/// Helper: a loaded BookmarkManager over a fresh in-memory database.
fn setup() -> (BookmarkManager, Arc<Database>) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
    let mut mgr = BookmarkManager::new(db.clone(), seed_bookmarks());
    mgr.load().expect("load failed");
    (mgr, db)
}

fn form(title: &str, url: &str, tags: &str) -> DraftFields {
    DraftFields {
        title: title.to_string(),
        url: url.to_string(),
        tags: tags.to_string(),
        note: String::new(),
    }
}

#[test]
fn test_add_bookmark_classifies_and_splits_tags() {
    let (mut mgr, _db) = setup();
    let b = mgr
        .add_bookmark(&form("  Sheet ", " https://docs.google.com/spreadsheets/d/1 ", "data, , data,plan "))
        .unwrap();

    assert_eq!(b.title, "Sheet");
    assert_eq!(b.url, "https://docs.google.com/spreadsheets/d/1");
    assert_eq!(b.url_type, UrlType::GoogleSheet);
    assert_eq!(b.tags, vec!["data", "data", "plan"]);
    assert_eq!(mgr.user_bookmarks()[0].id, b.id);
}

#[test]
fn test_add_bookmark_prepends_and_persists() {
    let (mut mgr, db) = setup();
    let first = mgr.add_bookmark(&form("One", "https://one.com", "")).unwrap();
    let second = mgr.add_bookmark(&form("Two", "https://two.com", "")).unwrap();

    let ids: Vec<&str> = mgr.user_bookmarks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

    let mut reopened = BookmarkManager::new(db, seed_bookmarks());
    reopened.load().unwrap();
    assert_eq!(reopened.user_bookmarks(), mgr.user_bookmarks());
}

#[test]
fn test_add_bookmark_rejects_empty_title() {
    let (mut mgr, _db) = setup();
    let err = mgr.add_bookmark(&form("   ", "https://a.com", "")).unwrap_err();
    assert!(matches!(err, BookmarkError::InvalidTitle));
    assert!(mgr.user_bookmarks().is_empty());
}

#[test]
fn test_add_bookmark_rejects_bad_url() {
    let (mut mgr, _db) = setup();
    assert!(matches!(
        mgr.add_bookmark(&form("A", "", "")),
        Err(BookmarkError::InvalidUrl(_))
    ));
    assert!(matches!(
        mgr.add_bookmark(&form("A", "example.com/path", "")),
        Err(BookmarkError::InvalidUrl(_))
    ));
}

#[test]
fn test_load_is_once() {
    let (mut mgr, db) = setup();
    db.set(BOOKMARKS_KEY, r#"[{"id":"late","title":"A","url":"https://a.com"}]"#).unwrap();
    assert_eq!(mgr.load().unwrap(), 0);
    assert!(mgr.user_bookmarks().is_empty());
}

#[test]
fn test_import_reports_counts_and_persists() {
    let (mut mgr, db) = setup();
    let report = mgr
        .import_text(r#"[{"id":"a","title":"A","url":"https://a.com"},{"title":""}]"#)
        .unwrap();
    assert_eq!(report.accepted, 1);
    assert_eq!(report.rejected, 1);

    let stored = db.get(BOOKMARKS_KEY).unwrap().unwrap();
    assert!(stored.contains("\"id\":\"a\""));
}

#[test]
fn test_empty_import_leaves_collection_untouched() {
    let (mut mgr, db) = setup();
    mgr.add_bookmark(&form("Keep", "https://keep.com", "")).unwrap();
    let before = db.get(BOOKMARKS_KEY).unwrap();

    let report = mgr.import_text(r#"[{"title":""}]"#).unwrap();
    assert!(report.is_empty());
    assert_eq!(mgr.user_bookmarks().len(), 1);
    assert_eq!(db.get(BOOKMARKS_KEY).unwrap(), before);
}

#[test]
fn test_import_batch_error_propagates() {
    let (mut mgr, _db) = setup();
    let err = mgr.import_text("{}").unwrap_err();
    assert!(matches!(err, BookmarkError::Interchange(InterchangeError::NotAnArray)));
}

#[test]
fn test_export_excludes_seed() {
    let (mut mgr, _db) = setup();
    mgr.add_bookmark(&form("Mine", "https://mine.com", "")).unwrap();
    let exported: Vec<serde_json::Value> = serde_json::from_str(&mgr.export_text().unwrap()).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0]["title"], "Mine");
}

#[test]
fn test_seed_id_cannot_be_shadowed_by_import() {
    let (mut mgr, _db) = setup();
    mgr.import_text(r#"[{"id":"seed-rust-book","title":"Imposter","url":"https://evil.com"}]"#)
        .unwrap();

    let combined = mgr.combined();
    let rust_book = combined.iter().find(|b| b.id == "seed-rust-book").unwrap();
    assert_eq!(rust_book.title, "The Rust Programming Language");
    assert_eq!(combined.len(), mgr.seed_bookmarks().len());
}

#[test]
fn test_new_bookmark_is_first_in_combined_view() {
    let (mut mgr, _db) = setup();
    let b = mgr.add_bookmark(&form("Fresh", "https://fresh.dev", "rust")).unwrap();
    assert_eq!(mgr.combined()[0].id, b.id);
}

#[test]
fn test_filtered_and_tags_cover_seed_and_user() {
    let (mut mgr, _db) = setup();
    mgr.add_bookmark(&form("Zig notes", "https://ziglang.org", "zig")).unwrap();

    assert!(mgr.tags().contains(&"zig".to_string()));
    assert!(mgr.tags().contains(&"css".to_string()));

    let zig = mgr.filtered(&BookmarkFilter::new("", "zig"));
    assert_eq!(zig.len(), 1);
    assert_eq!(zig[0].title, "Zig notes");
}

/// A store write that fails must leave the in-memory collection as it was,
/// so the view never shows records the store does not hold.
#[test]
fn test_failed_save_leaves_collection_unchanged() {
    let (mut mgr, db) = setup();
    let kept = mgr.add_bookmark(&form("Kept", "https://kept.dev", "")).unwrap();
    db.connection().execute("DROP TABLE kv_store", []).unwrap();

    let add = mgr.add_bookmark(&form("Lost", "https://lost.dev", ""));
    assert!(matches!(add, Err(BookmarkError::Store(_))));
    assert_eq!(mgr.user_bookmarks().len(), 1);

    let import = mgr.import_text(r#"[{"id":"x","title":"X","url":"https://x.dev"}]"#);
    assert!(matches!(import, Err(BookmarkError::Store(_))));
    assert_eq!(mgr.user_bookmarks().len(), 1);
    assert_eq!(mgr.user_bookmarks()[0].id, kept.id);
    assert!(mgr.combined().iter().all(|b| b.title != "Lost" && b.id != "x"));
}
