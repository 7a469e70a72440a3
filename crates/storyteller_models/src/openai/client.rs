//! Chat completions client.

use super::dto::{self, ChatCompletionRequest, ChatCompletionResponse};
use crate::OpenAiConfig;
use async_trait::async_trait;
use storyteller_core::CompletionRequest;
use storyteller_error::{ModelError, ModelErrorKind};
use storyteller_interface::TextGenerator;
use tracing::{debug, error, instrument};

/// Client for OpenAI or any server speaking the chat completions protocol.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct OpenAiClient {
    /// Connection settings
    config: OpenAiConfig,
    #[getter(skip)]
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip(config), fields(base_url = %config.base_url, model = %config.model))]
    pub fn new(config: OpenAiConfig) -> Result<Self, ModelError> {
        let client = crate::http_client(config.timeout_secs).map_err(|e| {
            ModelError::new(ModelErrorKind::Configuration(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        debug!("Created OpenAI client");
        Ok(Self { config, client })
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ModelError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        debug!(url = %url, "Sending chat completion request");

        let mut req = self.client.post(&url).json(request);

        if let Some(api_key) = &self.config.api_key {
            req = req.bearer_auth(api_key);
        }

        let response = req.send().await.map_err(|e| {
            error!(error = %e, "Request failed");
            ModelError::new(ModelErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = dto::error_message(&body);
            error!(status = %status, message = %message, "Server returned error");
            return Err(ModelError::new(ModelErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let result = response.json::<ChatCompletionResponse>().await.map_err(|e| {
            error!(error = %e, "Failed to parse response");
            ModelError::new(ModelErrorKind::Deserialization(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(choices = result.choices.len(), "Chat completion successful");
        Ok(result)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        let wire = ChatCompletionRequest::from_request(&self.config.model, request);
        let response = self.chat_completion(&wire).await?;

        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| ModelError::new(ModelErrorKind::EmptyResponse))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
