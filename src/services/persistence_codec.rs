//! Persistence codec for the user collection.
//!
//! Reads and writes the `til-bookmarks` key. Stored JSON is untrusted: it may
//! predate fields such as `urlType` or have been edited by hand, so every
//! element passes through [`normalize_record`] on the way in. The same
//! function validates import payloads.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::database::KeyValueStore;
use crate::services::url_classifier;
use crate::types::bookmark::{self, Bookmark};
use crate::types::errors::StoreError;
use crate::types::url_type::UrlType;

/// Store key holding the JSON array of user bookmarks.
pub const BOOKMARKS_KEY: &str = "til-bookmarks";

/// Normalizes one untrusted JSON element into a bookmark.
///
/// Returns `None` (drop) unless the element is an object whose `title` and
/// `url` are non-empty strings after trimming and whose `url` parses as an
/// absolute URL. Other fields are repaired rather than rejected:
/// - `tags`: non-string and blank entries removed, the rest trimmed
/// - `note`: `""` unless a string
/// - `savedAt`: `now` unless a parseable date string
/// - `id`: a fresh UUID unless a non-empty string
/// - `urlType`: recomputed from the URL unless a known label
pub fn normalize_record(value: &Value, now: DateTime<Utc>) -> Option<Bookmark> {
    let obj = value.as_object()?;

    let title = non_empty_str(obj.get("title"))?;
    let url = non_empty_str(obj.get("url"))?;
    if Url::parse(&url).is_err() {
        return None;
    }

    let tags = obj
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let note = obj
        .get("note")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_default();

    let saved_at = obj
        .get("savedAt")
        .and_then(Value::as_str)
        .and_then(bookmark::parse_saved_at)
        .unwrap_or(now);

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let url_type = obj
        .get("urlType")
        .and_then(Value::as_str)
        .and_then(UrlType::from_label)
        .unwrap_or_else(|| url_classifier::classify(&url));

    Some(Bookmark {
        id,
        title,
        url,
        url_type,
        tags,
        note,
        saved_at,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Normalizes every element, returning the survivors and the drop count.
pub fn normalize_all(items: &[Value], now: DateTime<Utc>) -> (Vec<Bookmark>, usize) {
    let kept: Vec<Bookmark> = items
        .iter()
        .filter_map(|item| normalize_record(item, now))
        .collect();
    let dropped = items.len() - kept.len();
    (kept, dropped)
}

/// Decodes the stored text of the user collection.
///
/// Invalid JSON or a non-array top level decodes to an empty collection.
pub fn decode(raw: &str) -> Vec<Bookmark> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "stored bookmarks are not valid JSON; starting empty");
            return Vec::new();
        }
    };
    let Some(items) = parsed.as_array() else {
        warn!("stored bookmarks are not a JSON array; starting empty");
        return Vec::new();
    };

    let (kept, dropped) = normalize_all(items, bookmark::now());
    if dropped > 0 {
        debug!(kept = kept.len(), dropped, "dropped malformed stored bookmarks");
    }
    kept
}

/// Loads the user collection from the store. An absent key is an empty
/// collection.
pub fn load<S: KeyValueStore>(store: &S) -> Result<Vec<Bookmark>, StoreError> {
    let bookmarks = match store.get(BOOKMARKS_KEY)? {
        Some(raw) => decode(&raw),
        None => Vec::new(),
    };
    info!(count = bookmarks.len(), "loaded user bookmarks");
    Ok(bookmarks)
}

/// Overwrites the stored user collection.
pub fn save<S: KeyValueStore>(store: &S, user: &[Bookmark]) -> Result<(), StoreError> {
    let json = serde_json::to_string(user)
        .map_err(|e| StoreError::SerializationError(e.to_string()))?;
    store.set(BOOKMARKS_KEY, &json)?;
    debug!(count = user.len(), "saved user bookmarks");
    Ok(())
}
