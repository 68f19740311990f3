//! Search and tag filtering over the combined view.

use url::Url;

use crate::types::bookmark::{Bookmark, BookmarkFilter};

/// Host of the bookmark URL with a leading `www.` removed, or `""` when the
/// URL does not parse.
pub fn display_host(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
        .unwrap_or_default()
}

/// Text a search query is matched against: title, note, tags and host,
/// space-joined and lowercased.
pub fn haystack(bookmark: &Bookmark) -> String {
    let tags = bookmark.tags.join(" ");
    let host = display_host(&bookmark.url);
    [bookmark.title.as_str(), bookmark.note.as_str(), tags.as_str(), host.as_str()]
        .join(" ")
        .to_lowercase()
}

/// True when the bookmark passes both the tag and the search constraint.
pub fn matches(bookmark: &Bookmark, tag: &str, needle: &str) -> bool {
    let tag_ok = tag.is_empty() || bookmark.tags.iter().any(|t| t == tag);
    tag_ok && (needle.is_empty() || haystack(bookmark).contains(needle))
}

/// Returns the records matching `filter`, in input order.
///
/// Search is a case-insensitive substring match, not tokenized.
pub fn filter<'a>(collection: &'a [Bookmark], filter: &BookmarkFilter) -> Vec<&'a Bookmark> {
    let needle = filter.search.trim().to_lowercase();
    collection
        .iter()
        .filter(|b| matches(b, &filter.tag, &needle))
        .collect()
}
