//! URL classifier.
//!
//! Maps a URL string to a [`UrlType`] by walking a statically ordered rule
//! table. Rules that share a host are listed path-prefix first, so the
//! host-only catch-all for that host never shadows them.

use url::Url;

use crate::types::url_type::UrlType;

/// Predicate over the parsed URL.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Host equals, or is a subdomain of, one of the listed domains.
    Host(&'static [&'static str]),
    /// Host matches and the path starts with the prefix.
    HostPath(&'static [&'static str], &'static str),
    /// Path ends with the suffix (case-insensitive).
    PathSuffix(&'static str),
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub url_type: UrlType,
    pub matcher: Matcher,
}

const GOOGLE_DOCS: &[&str] = &["docs.google.com"];

/// Evaluated top to bottom; first match wins.
pub const RULES: &[Rule] = &[
    Rule { url_type: UrlType::GitHubGist, matcher: Matcher::Host(&["gist.github.com"]) },
    Rule { url_type: UrlType::GitHubRepo, matcher: Matcher::Host(&["github.com"]) },
    Rule { url_type: UrlType::GoogleDoc, matcher: Matcher::HostPath(GOOGLE_DOCS, "/document") },
    Rule { url_type: UrlType::GoogleSheet, matcher: Matcher::HostPath(GOOGLE_DOCS, "/spreadsheets") },
    Rule { url_type: UrlType::GoogleSlides, matcher: Matcher::HostPath(GOOGLE_DOCS, "/presentation") },
    Rule { url_type: UrlType::GoogleForm, matcher: Matcher::HostPath(GOOGLE_DOCS, "/forms") },
    Rule { url_type: UrlType::GoogleDrive, matcher: Matcher::Host(&["drive.google.com", "docs.google.com"]) },
    Rule { url_type: UrlType::FigmaFile, matcher: Matcher::Host(&["figma.com"]) },
    Rule { url_type: UrlType::MiroBoard, matcher: Matcher::HostPath(&["miro.com"], "/app/board") },
    Rule { url_type: UrlType::NotionPage, matcher: Matcher::Host(&["notion.so", "notion.site"]) },
    Rule { url_type: UrlType::YouTubeVideo, matcher: Matcher::Host(&["youtube.com", "youtu.be"]) },
    Rule { url_type: UrlType::LoomVideo, matcher: Matcher::HostPath(&["loom.com"], "/share") },
    Rule { url_type: UrlType::StackOverflow, matcher: Matcher::Host(&["stackoverflow.com", "stackexchange.com"]) },
    Rule { url_type: UrlType::Wikipedia, matcher: Matcher::Host(&["wikipedia.org"]) },
    Rule { url_type: UrlType::Pdf, matcher: Matcher::PathSuffix(".pdf") },
    Rule {
        url_type: UrlType::Article,
        matcher: Matcher::Host(&["medium.com", "dev.to", "substack.com", "css-tricks.com", "smashingmagazine.com"]),
    },
];

impl Matcher {
    fn matches(&self, host: &str, path: &str) -> bool {
        match self {
            Matcher::Host(domains) => host_matches(host, domains),
            Matcher::HostPath(domains, prefix) => host_matches(host, domains) && path.starts_with(prefix),
            Matcher::PathSuffix(suffix) => path.to_ascii_lowercase().ends_with(suffix),
        }
    }
}

fn host_matches(host: &str, domains: &[&str]) -> bool {
    domains.iter().any(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Classifies a URL. Unparseable input and unmatched URLs fall back to
/// [`UrlType::Generic`].
pub fn classify(url: &str) -> UrlType {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return UrlType::Generic;
    };
    let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
    let path = parsed.path();

    RULES
        .iter()
        .find(|rule| rule.matcher.matches(&host, path))
        .map(|rule| rule.url_type)
        .unwrap_or(UrlType::Generic)
}
