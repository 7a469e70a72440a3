//! Connection settings for an OpenAI-compatible server.

use storyteller_error::{ModelError, ModelErrorKind};

/// Connection settings for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenAiConfig {
    /// Base URL without the `/v1/...` suffix (e.g., "https://api.openai.com")
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token; omitted from requests when `None`
    pub api_key: Option<String>,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Public OpenAI endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";
    /// Model used when none is configured.
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    /// Request timeout used when none is configured.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Create a configuration without an API key.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_BASE_URL` (default: "https://api.openai.com")
    /// - `OPENAI_MODEL` (default: "gpt-4o-mini")
    ///
    /// # Errors
    ///
    /// Returns error if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ModelError::new(ModelErrorKind::Configuration(
                "OPENAI_API_KEY not set".into(),
            ))
        })?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        Ok(Self::new(base_url, model).with_api_key(api_key))
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL, Self::DEFAULT_MODEL)
    }
}
