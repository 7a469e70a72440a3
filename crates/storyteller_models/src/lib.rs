//! HTTP adapters for the Storyteller pipeline collaborators.
//!
//! Each adapter implements one capability trait from
//! `storyteller_interface` and sits behind its own feature flag:
//!
//! - **OpenAI** chat completions ([`OpenAiClient`], `openai` feature)
//! - **HuggingFace** image captioning ([`HuggingFaceCaptioner`], `huggingface` feature)
//! - **Google Translate** speech ([`GoogleTranslateSpeaker`], `google-tts` feature)
//!
//! All three are enabled by default. Every adapter takes its base URL from
//! configuration, so tests and self-hosted deployments can point them at
//! another server.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "openai")]
//! # {
//! use storyteller_core::{ChatMessage, CompletionRequest};
//! use storyteller_interface::TextGenerator;
//! use storyteller_models::{OpenAiClient, OpenAiConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new(OpenAiConfig::from_env()?)?;
//! let request = CompletionRequest::builder()
//!     .messages(vec![ChatMessage::user("Tell me a story")])
//!     .max_tokens(100u32)
//!     .temperature(0.7f32)
//!     .build()?;
//! let text = client.complete(&request).await?;
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "huggingface")]
mod huggingface;

#[cfg(feature = "google-tts")]
mod google_tts;

#[cfg(feature = "openai")]
pub use openai::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, OpenAiClient,
    OpenAiConfig, Usage,
};

#[cfg(feature = "huggingface")]
pub use huggingface::{HuggingFaceCaptioner, HuggingFaceConfig};

#[cfg(feature = "google-tts")]
pub use google_tts::{GoogleTranslateSpeaker, GoogleTtsConfig, MAX_CHUNK_CHARS, split_text};

/// Builds a reqwest client with a whole-request timeout.
#[cfg(any(feature = "openai", feature = "huggingface", feature = "google-tts"))]
fn http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
}
