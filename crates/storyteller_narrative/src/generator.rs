//! Narrative generation on top of a text-generation backend.

use crate::build_prompt;
use storyteller_core::{ChatMessage, CompletionRequest, GenerationParams, NarrativeOverrides};
use storyteller_error::{NarrativeError, NarrativeErrorKind};
use storyteller_interface::TextGenerator;
use tracing::{debug, error, instrument};

/// Persona given to the model for every narrative.
pub const SYSTEM_INSTRUCTION: &str = "You are a creative writer who excels at crafting mysterious and intriguing narratives. Your stories should:
1. Evoke a sense of wonder, curiosity, and the unknown
2. Use words like 'mysterious', 'strange', 'unknown', 'curious', 'wonder' frequently
3. Create an atmosphere of intrigue and mystery
4. Transform even ordinary scenes into something enigmatic
5. Make the reader question what lies beneath the surface";

/// Generates narratives from captions.
///
/// Holds the service defaults captured at construction. Every call layers
/// its own [`NarrativeOverrides`] over those defaults; nothing carries over
/// between calls.
#[derive(Debug, Clone)]
pub struct NarrativeGenerator<G> {
    generator: G,
    defaults: GenerationParams,
}

impl<G: TextGenerator> NarrativeGenerator<G> {
    /// Create a generator around `generator` with the given defaults.
    pub fn new(generator: G, defaults: GenerationParams) -> Self {
        Self {
            generator,
            defaults,
        }
    }

    /// Service-level defaults.
    pub fn defaults(&self) -> &GenerationParams {
        &self.defaults
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &G {
        &self.generator
    }

    /// Generate a narrative for `caption`.
    ///
    /// # Errors
    ///
    /// - [`NarrativeErrorKind::InvalidInput`] if `caption` is empty; the
    ///   backend is not called.
    /// - [`NarrativeErrorKind::Generation`] for any backend failure, carrying
    ///   the backend's description. Nothing is retried.
    #[instrument(
        skip(self, caption, overrides),
        fields(
            provider = self.generator.provider_name(),
            model = self.generator.model_name(),
            caption_len = caption.len(),
        )
    )]
    pub async fn generate(
        &self,
        caption: &str,
        overrides: &NarrativeOverrides,
    ) -> Result<String, NarrativeError> {
        if caption.is_empty() {
            return Err(NarrativeError::new(NarrativeErrorKind::InvalidInput(
                "Caption cannot be empty".to_string(),
            )));
        }

        let params = self.defaults.resolve(overrides);
        let prompt = build_prompt(caption, Some(params.template()));

        debug!(
            max_tokens = params.max_tokens(),
            temperature = params.temperature(),
            prompt_len = prompt.chars().count(),
            custom_template = overrides.template.is_some(),
            "Resolved narrative parameters"
        );

        let request = CompletionRequest::builder()
            .messages(vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt),
            ])
            .max_tokens(*params.max_tokens())
            .temperature(*params.temperature())
            .n(1u32)
            .build()
            .map_err(|e| NarrativeError::new(NarrativeErrorKind::Generation(e.to_string())))?;

        let text = self.generator.complete(&request).await.map_err(|e| {
            error!(error = %e, "Text generation failed");
            NarrativeError::new(NarrativeErrorKind::Generation(e.kind.to_string()))
        })?;

        let narrative = text.trim().to_string();
        debug!(narrative_len = narrative.len(), "Narrative generated");
        Ok(narrative)
    }
}
