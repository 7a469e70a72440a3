//! Image captioning client.

use super::dto::{CaptionResponse, ErrorBody};
use async_trait::async_trait;
use std::path::Path;
use storyteller_error::{CaptionError, CaptionErrorKind};
use storyteller_interface::Captioner;
use tracing::{debug, error, instrument};

/// Connection settings for the HuggingFace Inference API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HuggingFaceConfig {
    /// Base URL; the model path is appended as `/models/{model}`
    pub base_url: String,
    /// Image-to-text model identifier
    pub model: String,
    /// API token; anonymous requests are rate limited hard
    pub api_key: Option<String>,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl HuggingFaceConfig {
    /// Hosted Inference API.
    pub const DEFAULT_BASE_URL: &'static str = "https://api-inference.huggingface.co";
    /// BLIP base captioning model.
    pub const DEFAULT_MODEL: &'static str = "Salesforce/blip-image-captioning-base";
    /// Cold models can take a while to load.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Create a configuration without an API token.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the API token
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

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL, Self::DEFAULT_MODEL)
    }
}

/// Captions images with a hosted image-to-text model.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct HuggingFaceCaptioner {
    /// Connection settings
    config: HuggingFaceConfig,
    #[getter(skip)]
    client: reqwest::Client,
}

impl HuggingFaceCaptioner {
    /// Create a new captioner.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip(config), fields(model = %config.model))]
    pub fn new(config: HuggingFaceConfig) -> Result<Self, CaptionError> {
        let client = crate::http_client(config.timeout_secs).map_err(|e| {
            CaptionError::new(CaptionErrorKind::Http(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        debug!("Created HuggingFace captioner");
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// MIME type from the file extension; the API sniffs the bytes anyway.
fn content_type(image_path: &Path) -> &'static str {
    match image_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl Captioner for HuggingFaceCaptioner {
    #[instrument(skip(self), fields(model = %self.config.model, path = %image_path.display()))]
    async fn caption(&self, image_path: &Path) -> Result<String, CaptionError> {
        let image = tokio::fs::read(image_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CaptionError::new(CaptionErrorKind::ImageNotFound(
                    image_path.display().to_string(),
                ))
            } else {
                CaptionError::new(CaptionErrorKind::ImageRead(format!(
                    "{}: {}",
                    image_path.display(),
                    e
                )))
            }
        })?;

        let url = self.endpoint();
        debug!(url = %url, bytes = image.len(), "Sending image to HuggingFace");

        let mut req = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type(image_path))
            .body(image);

        if let Some(api_key) = &self.config.api_key {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            error!(error = %e, "HTTP request failed");
            CaptionError::new(CaptionErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response");
            CaptionError::new(CaptionErrorKind::Http(format!(
                "Failed to read response: {}",
                e
            )))
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            error!(status = %status, message = %message, "Inference API error");
            return Err(CaptionError::new(CaptionErrorKind::Inference {
                status: status.as_u16(),
                message,
            }));
        }

        let parsed: CaptionResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "Unexpected inference response");
            CaptionError::new(CaptionErrorKind::Inference {
                status: status.as_u16(),
                message: format!("Unexpected response: {}", e),
            })
        })?;

        let caption = parsed
            .into_caption()
            .ok_or_else(|| CaptionError::new(CaptionErrorKind::EmptyCaption))?;

        debug!(caption_len = caption.len(), "Generated caption");
        Ok(caption)
    }

    fn provider_name(&self) -> &'static str {
        "huggingface"
    }
}
