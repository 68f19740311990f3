//! Identity reconciler.
//!
//! Builds the combined view from the seed and user collections. The view is
//! derived on every read and never stored.

use std::collections::{BTreeSet, HashSet};

use crate::types::bookmark::Bookmark;

/// Merges seed and user bookmarks into one ordered view.
///
/// - user records whose id collides with a seed id are dropped (seed wins)
/// - remaining duplicate ids keep their first occurrence
/// - the result is stable-sorted newest `saved_at` first
pub fn combine(seed: &[Bookmark], user: &[Bookmark]) -> Vec<Bookmark> {
    let seed_ids: HashSet<&str> = seed.iter().map(|b| b.id.as_str()).collect();

    let mut seen: HashSet<&str> = HashSet::with_capacity(seed.len() + user.len());
    let mut combined: Vec<Bookmark> = seed
        .iter()
        .chain(user.iter().filter(|b| !seed_ids.contains(b.id.as_str())))
        .filter(|b| seen.insert(b.id.as_str()))
        .cloned()
        .collect();

    // `sort_by` is stable, so equal timestamps keep their input order.
    combined.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    combined
}

/// Returns every distinct tag in the collection, case-sensitive, sorted.
pub fn derive_tags(collection: &[Bookmark]) -> Vec<String> {
    collection
        .iter()
        .flat_map(|b| b.tags.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
