//! Property-based tests for the identity reconciler.
//!
//! *For any* seed and user collections, the combined view holds each id at
//! most once, never lets a user record replace a seed record, and is ordered
//! newest first.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use tilmarks::services::reconciler::{combine, derive_tags};
use tilmarks::types::bookmark::Bookmark;
use tilmarks::types::url_type::UrlType;

/// Small id space so collisions are common.
fn arb_bookmark(prefix: &'static str) -> impl Strategy<Value = Bookmark> {
    (
        "[a-e]",
        0i64..1_000,
        proptest::collection::vec("[a-dA-D]{1,3}", 0..3),
    )
        .prop_map(move |(id, secs, tags)| Bookmark {
            id: id.clone(),
            title: format!("{prefix}-{id}"),
            url: format!("https://{id}.example.com"),
            url_type: UrlType::Generic,
            tags,
            note: String::new(),
            saved_at: DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default(),
        })
}

fn arb_seed() -> impl Strategy<Value = Vec<Bookmark>> {
    proptest::collection::vec(arb_bookmark("seed"), 0..4).prop_map(|items| {
        let mut seen = HashSet::new();
        items.into_iter().filter(|b| seen.insert(b.id.clone())).collect()
    })
}

fn arb_user() -> impl Strategy<Value = Vec<Bookmark>> {
    proptest::collection::vec(arb_bookmark("user"), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn combined_ids_are_unique(seed in arb_seed(), user in arb_user()) {
        let combined = combine(&seed, &user);
        let ids: HashSet<&str> = combined.iter().map(|b| b.id.as_str()).collect();
        prop_assert_eq!(ids.len(), combined.len());

        let expected: HashSet<&str> = seed.iter().chain(user.iter()).map(|b| b.id.as_str()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn seed_always_wins(seed in arb_seed(), user in arb_user()) {
        let combined = combine(&seed, &user);
        for s in &seed {
            let found = combined.iter().find(|b| b.id == s.id).unwrap();
            prop_assert_eq!(found, s);
        }
    }

    #[test]
    fn first_user_occurrence_kept(user in arb_user()) {
        let combined = combine(&[], &user);
        for b in &combined {
            let first = user.iter().find(|u| u.id == b.id).unwrap();
            prop_assert_eq!(b, first);
        }
    }

    #[test]
    fn sorted_newest_first(seed in arb_seed(), user in arb_user()) {
        let combined = combine(&seed, &user);
        for pair in combined.windows(2) {
            prop_assert!(pair[0].saved_at >= pair[1].saved_at);
        }
    }

    #[test]
    fn empty_user_yields_sorted_seed(seed in arb_seed()) {
        let mut expected = seed.clone();
        expected.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        prop_assert_eq!(combine(&seed, &[]), expected);
    }

    #[test]
    fn tags_are_sorted_and_complete(user in arb_user()) {
        let tags = derive_tags(&user);
        let mut sorted = tags.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(&tags, &sorted);
        for b in &user {
            for t in &b.tags {
                prop_assert!(tags.contains(t));
            }
        }
    }
}
