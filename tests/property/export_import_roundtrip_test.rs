//! Property-based tests for the export/import round trip.
//!
//! Exporting a user collection and importing the snapshot into an empty
//! collection yields the same bookmarks, and the same ids.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use tilmarks::database::Database;
use tilmarks::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use tilmarks::services::interchange::{export_snapshot, import_batch, merge_imported};
use tilmarks::types::bookmark::Bookmark;
use tilmarks::types::url_type::UrlType;

/// Strategy for generating absolute URLs.
fn arb_url() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9]{2,12}",
        prop_oneof![Just(".com"), Just(".org"), Just(".dev"), Just(".io")],
        proptest::option::of("/[a-z0-9]{1,10}"),
    )
        .prop_map(|(scheme, host, tld, path)| {
            format!("{}://{}{}{}", scheme, host, tld, path.unwrap_or_default())
        })
}

/// Strategy for a bookmark with millisecond-precision timestamp and
/// already-trimmed text fields, i.e. one the codec would store unchanged.
fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
    (
        "[a-z0-9]{1,8}",
        "[a-zA-Z][a-zA-Z0-9 ]{0,20}[a-zA-Z0-9]",
        arb_url(),
        proptest::sample::select(UrlType::ALL.to_vec()),
        proptest::collection::vec("[a-z]{1,8}", 0..4),
        "[a-zA-Z0-9 .,]{0,30}",
        0i64..4_000_000_000_000,
    )
        .prop_map(|(id, title, url, url_type, tags, note, millis)| Bookmark {
            id,
            title,
            url,
            url_type,
            tags,
            note,
            saved_at: DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default(),
        })
}

/// A collection with unique ids, as the user collection always has.
fn arb_collection() -> impl Strategy<Value = Vec<Bookmark>> {
    proptest::collection::vec(arb_bookmark(), 0..12).prop_map(|items| {
        let mut seen = BTreeSet::new();
        items.into_iter().filter(|b| seen.insert(b.id.clone())).collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn export_then_import_preserves_collection(user in arb_collection()) {
        let snapshot = export_snapshot(&user).unwrap();
        let outcome = import_batch(&snapshot).unwrap();
        prop_assert_eq!(outcome.rejected, 0);

        let merged = merge_imported(&[], outcome.accepted);
        let ids = |c: &[Bookmark]| c.iter().map(|b| b.id.clone()).collect::<BTreeSet<_>>();
        prop_assert_eq!(ids(merged.as_slice()), ids(user.as_slice()));
        prop_assert_eq!(merged, user);
    }

    #[test]
    fn save_then_load_preserves_collection(user in arb_collection()) {
        let db = Arc::new(Database::open_in_memory().expect("Failed to open in-memory database"));
        let mut writer = BookmarkManager::new(db.clone(), Vec::new());
        writer.load().unwrap();
        let report = writer.import_text(&export_snapshot(&user).unwrap()).unwrap();
        prop_assert_eq!(report.accepted, user.len());

        let mut reader = BookmarkManager::new(db, Vec::new());
        reader.load().unwrap();
        prop_assert_eq!(reader.user_bookmarks(), user.as_slice());
    }
}
