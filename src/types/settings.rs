use serde::{Deserialize, Serialize};

/// Top-level application settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub status: StatusSettings,
    #[serde(default)]
    pub autofill: AutofillSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the key-value store lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageSettings {
    /// Explicit database file. `None` means `<data dir>/tilmarks.db`.
    pub database_path: Option<String>,
}

/// How long status messages stay visible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusSettings {
    pub success_dwell_ms: u64,
    pub error_dwell_ms: u64,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            success_dwell_ms: 2500,
            error_dwell_ms: 5000,
        }
    }
}

/// Auto-fill summarizer endpoint and limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutofillSettings {
    /// OpenAI-compatible chat completions URL.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Extracted page text shorter than this is rejected.
    pub min_chars: usize,
    /// At most this many characters of page text are sent to the model.
    pub max_chars: usize,
    pub timeout_secs: u64,
}

impl Default for AutofillSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            min_chars: 150,
            max_chars: 12000,
            timeout_secs: 30,
        }
    }
}

/// Default log filter used when `RUST_LOG` is unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
