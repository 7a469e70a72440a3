//! Speech synthesis client.

use super::chunking::{MAX_CHUNK_CHARS, split_text};
use async_trait::async_trait;
use storyteller_core::LanguageCode;
use storyteller_error::{SpeechError, SpeechErrorKind};
use storyteller_interface::Speaker;
use tracing::{debug, error, instrument};

/// Connection settings for the translate TTS endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoogleTtsConfig {
    /// Base URL; `/translate_tts` is appended
    pub base_url: String,
    /// Per-chunk request timeout in seconds
    pub timeout_secs: u64,
}

impl GoogleTtsConfig {
    /// Public Google Translate host.
    pub const DEFAULT_BASE_URL: &'static str = "https://translate.google.com";
    /// Request timeout used when none is configured.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a configuration for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for GoogleTtsConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

/// Synthesizes MP3 speech through Google Translate.
///
/// Text is sent in chunks of at most [`MAX_CHUNK_CHARS`] characters and the
/// returned MP3 frames are concatenated in order.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct GoogleTranslateSpeaker {
    /// Connection settings
    config: GoogleTtsConfig,
    #[getter(skip)]
    client: reqwest::Client,
}

impl GoogleTranslateSpeaker {
    /// Create a new speaker.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: GoogleTtsConfig) -> Result<Self, SpeechError> {
        let client = crate::http_client(config.timeout_secs).map_err(|e| {
            SpeechError::new(SpeechErrorKind::Http(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        Ok(Self { config, client })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &LanguageCode,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SpeechError> {
        let url = format!(
            "{}/translate_tts",
            self.config.base_url.trim_end_matches('/')
        );
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.as_str()),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "TTS request failed");
                SpeechError::new(SpeechErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, "TTS endpoint returned error");
            return Err(SpeechError::new(SpeechErrorKind::Api {
                status: status.as_u16(),
                message: message.trim().to_string(),
            }));
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read TTS response");
            SpeechError::new(SpeechErrorKind::Http(format!(
                "Failed to read response: {}",
                e
            )))
        })?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Speaker for GoogleTranslateSpeaker {
    #[instrument(skip(self, text), fields(language = %language, text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<Vec<u8>, SpeechError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::new(SpeechErrorKind::EmptyText));
        }

        let total = chunks.len();
        let mut audio = Vec::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, total).await?;
            debug!(idx, total, bytes = bytes.len(), "Synthesized chunk");
            audio.extend_from_slice(&bytes);
        }

        Ok(audio)
    }

    fn provider_name(&self) -> &'static str {
        "google-translate"
    }
}
