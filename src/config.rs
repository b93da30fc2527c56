use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_QUESTIONS_DIR: &str = "questions";

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the LEXA backend. `None` means the primary chat path is skipped.
    pub backend_base: Option<String>,
    /// Generative provider credential. Absence is a valid, non-fatal state.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub chat_timeout: Duration,
    pub questions_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_base: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            chat_timeout: Duration::from_secs(DEFAULT_CHAT_TIMEOUT_SECS),
            questions_dir: PathBuf::from(DEFAULT_QUESTIONS_DIR),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let chat_timeout = non_empty(lookup("LEXA_CHAT_TIMEOUT_SECS"))
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.chat_timeout);

        Self {
            backend_base: non_empty(lookup("LEXA_API_URL"))
                .map(|base| base.trim_end_matches('/').to_string()),
            gemini_api_key: non_empty(lookup("GEMINI_API_KEY")),
            gemini_model: non_empty(lookup("GEMINI_MODEL")).unwrap_or(defaults.gemini_model),
            gemini_api_base: non_empty(lookup("GEMINI_API_BASE"))
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_api_base),
            chat_timeout,
            questions_dir: non_empty(lookup("LEXA_QUESTIONS_DIR"))
                .map(PathBuf::from)
                .unwrap_or(defaults.questions_dir),
        }
    }

    pub fn backend_configured(&self) -> bool {
        self.backend_base.is_some()
    }

    pub fn provider_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}
