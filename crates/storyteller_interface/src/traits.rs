//! Trait definitions for pipeline collaborators.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use storyteller_core::{CompletionRequest, LanguageCode};
use storyteller_error::{CaptionError, ModelError, SpeechError};

/// Produces a short textual description of an image.
#[async_trait]
pub trait Captioner: Send + Sync {
    /// Caption the image stored at `image_path`.
    ///
    /// Fails when the path does not exist or the image cannot be decoded.
    async fn caption(&self, image_path: &Path) -> Result<String, CaptionError>;

    /// Provider name (e.g., "huggingface").
    fn provider_name(&self) -> &'static str;
}

/// Turns a chat-style prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one completion and return the text of the first choice, untrimmed.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Synthesizes speech audio from text.
#[async_trait]
pub trait Speaker: Send + Sync {
    /// Render `text` in `language` and return MP3 bytes.
    async fn synthesize(&self, text: &str, language: &LanguageCode)
    -> Result<Vec<u8>, SpeechError>;

    /// Provider name (e.g., "google-translate").
    fn provider_name(&self) -> &'static str;
}

#[async_trait]
impl<T: Captioner + ?Sized> Captioner for Arc<T> {
    async fn caption(&self, image_path: &Path) -> Result<String, CaptionError> {
        (**self).caption(image_path).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        (**self).complete(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: Speaker + ?Sized> Speaker for Arc<T> {
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
    ) -> Result<Vec<u8>, SpeechError> {
        (**self).synthesize(text, language).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}
