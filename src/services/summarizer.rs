//! Auto-fill summarizer.
//!
//! Fetches an article, reduces it to plain text, and asks an OpenAI-compatible
//! chat completion endpoint for a `{summary, tags}` pair used to prefill the
//! bookmark form. The rest of the crate only sees [`PageSummary`].

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};
use url::Url;

use crate::types::errors::SummaryError;
use crate::types::settings::AutofillSettings;
use crate::types::summary::PageSummary;

/// System instruction sent with every request.
pub const SUMMARY_INSTRUCTION: &str = "You summarize web articles for a bookmark manager. \
Reply with strict JSON only, no prose and no code fences, shaped exactly as \
{\"summary\": string, \"tags\": string}. The summary is at most two sentences. \
The tags value is 3 to 5 short lowercase topics separated by commas.";

#[allow(clippy::expect_used)]
static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("script/style regex is valid")
});

#[allow(clippy::expect_used)]
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag regex is valid"));

#[allow(clippy::expect_used)]
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Reduces an HTML page to readable text: drops script and style blocks,
/// strips the remaining tags, decodes common entities, collapses whitespace.
pub fn extract_text(html: &str) -> String {
    let without_blocks = SCRIPT_STYLE.replace_all(html, " ");
    let without_tags = TAG.replace_all(&without_blocks, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Returns at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builds the chat completion request for `text`.
pub fn build_request_body(model: &str, text: &str) -> Value {
    json!({
        "model": model,
        "temperature": 0.2,
        "response_format": {"type": "json_object"},
        "messages": [
            {"role": "system", "content": SUMMARY_INSTRUCTION},
            {"role": "user", "content": text},
        ],
    })
}

/// Parses the model's reply text into a summary.
///
/// Tolerates a fenced ```json block and a `tags` array.
pub fn parse_summary_content(content: &str) -> Result<PageSummary, SummaryError> {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let parsed: Value = serde_json::from_str(unfenced)
        .map_err(|e| SummaryError::MalformedResponse(format!("reply is not JSON: {}", e)))?;

    let summary = parsed
        .get("summary")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| SummaryError::MalformedResponse("missing \"summary\" string".to_string()))?;

    let tags = match parsed.get("tags") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => {
            return Err(SummaryError::MalformedResponse(
                "missing \"tags\" string".to_string(),
            ))
        }
    };

    Ok(PageSummary { summary, tags })
}

/// Extracts the reply text from a chat completion response body.
pub fn parse_completion(body: &Value) -> Result<PageSummary, SummaryError> {
    if let Some(message) = body.pointer("/error/message").and_then(Value::as_str) {
        return Err(SummaryError::ProviderError(message.to_string()));
    }
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| SummaryError::MalformedResponse("no choices[0].message.content".to_string()))?;
    parse_summary_content(content)
}

/// Message for a non-success reply: the JSON `error.message` when present,
/// else the start of the raw body (proxies answer with HTML or plain text).
pub fn provider_error_message(body: &str) -> String {
    if let Some(message) = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.pointer("/error/message"))
        .and_then(Value::as_str)
    {
        return message.to_string();
    }
    let text = extract_text(body);
    if text.is_empty() {
        "request failed".to_string()
    } else {
        truncate_chars(&text, 200).to_string()
    }
}

/// HTTP client for the summarizer.
pub struct SummaryClient {
    http: reqwest::Client,
    settings: AutofillSettings,
    api_key: String,
}

impl SummaryClient {
    /// Builds a client, reading the API key from the environment variable
    /// named in `settings.api_key_env`.
    ///
    /// # Errors
    /// `MissingCredential` when the variable is unset or blank. No request is
    /// attempted in that case.
    pub fn from_settings(settings: &AutofillSettings) -> Result<Self, SummaryError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SummaryError::MissingCredential(settings.api_key_env.clone()))?;
        Self::with_api_key(settings, api_key)
    }

    pub fn with_api_key(settings: &AutofillSettings, api_key: String) -> Result<Self, SummaryError> {
        if api_key.trim().is_empty() {
            return Err(SummaryError::MissingCredential(settings.api_key_env.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("tilmarks/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SummaryError::NetworkError(e.to_string()))?;
        Ok(Self {
            http,
            settings: settings.clone(),
            api_key,
        })
    }

    /// Downloads `url` and returns its readable text, rejecting pages with
    /// less than `min_chars` characters.
    pub async fn fetch_page_text(&self, url: &str) -> Result<String, SummaryError> {
        let parsed = Url::parse(url.trim()).map_err(|e| SummaryError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SummaryError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SummaryError::NetworkError(e.to_string()))?;
        let html = response
            .text()
            .await
            .map_err(|e| SummaryError::NetworkError(e.to_string()))?;

        let text = extract_text(&html);
        let found = text.chars().count();
        if found < self.settings.min_chars {
            return Err(SummaryError::TooLittleContent {
                found,
                required: self.settings.min_chars,
            });
        }
        Ok(text)
    }

    /// Fetches the page and asks the model for a summary and tags.
    ///
    /// Dropping the returned future abandons both requests.
    #[instrument(skip(self), fields(model = %self.settings.model))]
    pub async fn summarize(&self, url: &str) -> Result<PageSummary, SummaryError> {
        let text = self.fetch_page_text(url).await?;
        let excerpt = truncate_chars(&text, self.settings.max_chars);
        debug!(chars = excerpt.chars().count(), "sending page excerpt");

        let response = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(&self.api_key)
            .json(&build_request_body(&self.settings.model, excerpt))
            .send()
            .await
            .map_err(|e| SummaryError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SummaryError::ProviderError(format!(
                "HTTP {}: {}",
                status,
                provider_error_message(&text)
            )));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|e| SummaryError::MalformedResponse(e.to_string()))?;

        let summary = parse_completion(&body)?;
        info!(tags = %summary.tags, "received page summary");
        Ok(summary)
    }
}
