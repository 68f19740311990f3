//! Table-driven tests for the URL classifier.
//!
//! Each case pins one rule of the ordered table, including the precedence of
//! path rules over the host-only rule on shared Google hosts.

use rstest::rstest;
use tilmarks::services::url_classifier::classify;
use tilmarks::types::url_type::UrlType;

#[rstest]
#[case("https://github.com/serde-rs/serde", UrlType::GitHubRepo)]
#[case("https://gist.github.com/someone/abc123", UrlType::GitHubGist)]
#[case("https://docs.google.com/document/d/abc", UrlType::GoogleDoc)]
#[case("https://docs.google.com/spreadsheets/d/abc", UrlType::GoogleSheet)]
#[case("https://docs.google.com/presentation/d/abc", UrlType::GoogleSlides)]
#[case("https://docs.google.com/forms/d/abc", UrlType::GoogleForm)]
#[case("https://drive.google.com/file/d/abc", UrlType::GoogleDrive)]
#[case("https://docs.google.com/other/thing", UrlType::GoogleDrive)]
#[case("https://www.figma.com/file/xyz/Design", UrlType::FigmaFile)]
#[case("https://miro.com/app/board/xyz", UrlType::MiroBoard)]
#[case("https://sub.miro.com/app/board/xyz", UrlType::MiroBoard)]
#[case("https://www.notion.so/Page-123", UrlType::NotionPage)]
#[case("https://www.youtube.com/watch?v=abc", UrlType::YouTubeVideo)]
#[case("https://youtu.be/abc", UrlType::YouTubeVideo)]
#[case("https://www.loom.com/share/abc", UrlType::LoomVideo)]
#[case("https://stackoverflow.com/questions/1/how", UrlType::StackOverflow)]
#[case("https://en.wikipedia.org/wiki/Rust", UrlType::Wikipedia)]
#[case("https://example.com/paper.pdf", UrlType::Pdf)]
#[case("https://css-tricks.com/snippets/css/complete-guide-grid/", UrlType::Article)]
#[case("https://medium.com/@someone/post", UrlType::Article)]
#[case("https://example.com/", UrlType::Generic)]
#[case("not a url", UrlType::Generic)]
#[case("", UrlType::Generic)]
fn test_classify(#[case] url: &str, #[case] expected: UrlType) {
    assert_eq!(classify(url), expected, "classify({url:?})");
}

#[rstest]
#[case("https://GITHUB.com/rust-lang/rust", UrlType::GitHubRepo)]
#[case("https://Docs.Google.com/document/d/abc", UrlType::GoogleDoc)]
fn test_host_match_is_case_insensitive(#[case] url: &str, #[case] expected: UrlType) {
    assert_eq!(classify(url), expected);
}

#[test]
fn test_lookalike_host_is_not_a_subdomain() {
    assert_eq!(classify("https://notmiro.com/app/board/xyz"), UrlType::Generic);
    assert_eq!(classify("https://evilgithub.com/a/b"), UrlType::Generic);
}

#[test]
fn test_miro_host_without_board_path_is_generic() {
    assert_eq!(classify("https://miro.com/pricing"), UrlType::Generic);
}

#[test]
fn test_classify_is_deterministic() {
    let url = "https://docs.google.com/spreadsheets/d/abc";
    assert_eq!(classify(url), classify(url));
}

#[test]
fn test_labels_parse_back() {
    assert_eq!(classify("https://docs.google.com/document/d/abc").label(), "Google Doc");
    assert_eq!(UrlType::from_label("Miro Board"), Some(UrlType::MiroBoard));
    assert_eq!(UrlType::from_label("Blog Post"), None);
}
