use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::url_type::UrlType;

/// Represents a saved bookmark.
///
/// The serialized form (store and interchange files) uses camelCase keys and
/// writes `savedAt` as an RFC 3339 UTC timestamp with millisecond precision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub url_type: UrlType,
    pub tags: Vec<String>,
    pub note: String,
    #[serde(with = "saved_at_format")]
    pub saved_at: DateTime<Utc>,
}

/// Filter criteria applied to the combined view.
///
/// Empty `search` and empty `tag` both mean "no constraint".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookmarkFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub tag: String,
}

impl BookmarkFilter {
    pub fn new(search: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            tag: tag.into(),
        }
    }
}

/// Returns the current instant truncated to milliseconds, the precision
/// bookmarks are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Parses a stored `savedAt` string.
///
/// Accepts RFC 3339, RFC 2822, ISO-like date-times without an offset (read as
/// UTC) and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_saved_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Splits the comma-separated tag field of the bookmark form.
///
/// Entries are trimmed and empty ones dropped. Repeated tags are kept.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

mod saved_at_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_saved_at(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid savedAt timestamp: {}", raw)))
    }
}
