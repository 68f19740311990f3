use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of link categories assigned by the URL classifier.
///
/// Serialized as the display label, e.g. `"Google Doc"`. `Generic` is the
/// fallback for unparseable or unrecognized URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrlType {
    #[serde(rename = "GitHub Repo")]
    GitHubRepo,
    #[serde(rename = "GitHub Gist")]
    GitHubGist,
    #[serde(rename = "Google Doc")]
    GoogleDoc,
    #[serde(rename = "Google Sheet")]
    GoogleSheet,
    #[serde(rename = "Google Slides")]
    GoogleSlides,
    #[serde(rename = "Google Form")]
    GoogleForm,
    #[serde(rename = "Google Drive")]
    GoogleDrive,
    #[serde(rename = "Figma File")]
    FigmaFile,
    #[serde(rename = "Miro Board")]
    MiroBoard,
    #[serde(rename = "Notion Page")]
    NotionPage,
    #[serde(rename = "YouTube Video")]
    YouTubeVideo,
    #[serde(rename = "Loom Video")]
    LoomVideo,
    #[serde(rename = "Stack Overflow")]
    StackOverflow,
    Wikipedia,
    Article,
    #[serde(rename = "PDF")]
    Pdf,
    Generic,
}

impl UrlType {
    /// Every category, fallback last.
    pub const ALL: [UrlType; 17] = [
        UrlType::GitHubRepo,
        UrlType::GitHubGist,
        UrlType::GoogleDoc,
        UrlType::GoogleSheet,
        UrlType::GoogleSlides,
        UrlType::GoogleForm,
        UrlType::GoogleDrive,
        UrlType::FigmaFile,
        UrlType::MiroBoard,
        UrlType::NotionPage,
        UrlType::YouTubeVideo,
        UrlType::LoomVideo,
        UrlType::StackOverflow,
        UrlType::Wikipedia,
        UrlType::Article,
        UrlType::Pdf,
        UrlType::Generic,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            UrlType::GitHubRepo => "GitHub Repo",
            UrlType::GitHubGist => "GitHub Gist",
            UrlType::GoogleDoc => "Google Doc",
            UrlType::GoogleSheet => "Google Sheet",
            UrlType::GoogleSlides => "Google Slides",
            UrlType::GoogleForm => "Google Form",
            UrlType::GoogleDrive => "Google Drive",
            UrlType::FigmaFile => "Figma File",
            UrlType::MiroBoard => "Miro Board",
            UrlType::NotionPage => "Notion Page",
            UrlType::YouTubeVideo => "YouTube Video",
            UrlType::LoomVideo => "Loom Video",
            UrlType::StackOverflow => "Stack Overflow",
            UrlType::Wikipedia => "Wikipedia",
            UrlType::Article => "Article",
            UrlType::Pdf => "PDF",
            UrlType::Generic => "Generic",
        }
    }

    /// Looks up a category by its label.
    pub fn from_label(label: &str) -> Option<UrlType> {
        Self::ALL.iter().copied().find(|t| t.label() == label)
    }
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
