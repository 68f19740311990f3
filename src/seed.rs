//! Built-in example bookmarks.
//!
//! The seed collection is rebuilt from these literals on every start and is
//! never written to the store. Ids are fixed so user data can never shadow
//! them.

use chrono::{DateTime, Utc};

use crate::types::bookmark::Bookmark;
use crate::types::url_type::UrlType;

fn at(unix_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_secs, 0).unwrap_or_default()
}

fn entry(
    id: &str,
    title: &str,
    url: &str,
    url_type: UrlType,
    tags: &[&str],
    note: &str,
    saved_at: i64,
) -> Bookmark {
    Bookmark {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        url_type,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        note: note.to_string(),
        saved_at: at(saved_at),
    }
}

/// Returns the seed collection.
pub fn seed_bookmarks() -> Vec<Bookmark> {
    vec![
        entry(
            "seed-css-grid",
            "A Complete Guide to CSS Grid",
            "https://css-tricks.com/snippets/css/complete-guide-grid/",
            UrlType::Article,
            &["css", "layout"],
            "Reference for grid-template-areas and auto-fit vs auto-fill.",
            1705309200,
        ),
        entry(
            "seed-rust-book",
            "The Rust Programming Language",
            "https://doc.rust-lang.org/book/",
            UrlType::Generic,
            &["rust", "books"],
            "Chapter 15 on smart pointers is worth a reread.",
            1706884200,
        ),
        entry(
            "seed-flexbox-video",
            "Flexbox in 20 minutes",
            "https://www.youtube.com/watch?v=fYq5PXgSsbE",
            UrlType::YouTubeVideo,
            &["css", "video"],
            "",
            1710144900,
        ),
        entry(
            "seed-retro-board",
            "Team retro board",
            "https://miro.com/app/board/uXjVOexample=/",
            UrlType::MiroBoard,
            &["team"],
            "Template for monthly retros.",
            1713635100,
        ),
        entry(
            "seed-serde-repo",
            "serde-rs/serde",
            "https://github.com/serde-rs/serde",
            UrlType::GitHubRepo,
            &["rust", "serialization"],
            "Derive attributes cheat sheet lives in the docs site.",
            1714993200,
        ),
        entry(
            "seed-reading-list",
            "Reading list",
            "https://docs.google.com/spreadsheets/d/1ExampleSheetId/edit",
            UrlType::GoogleSheet,
            &["books"],
            "",
            1718727600,
        ),
    ]
}
