//! Generation parameters and per-request overrides.

use serde::{Deserialize, Serialize};

/// Placeholder every prompt template must contain exactly once.
pub const CAPTION_PLACEHOLDER: &str = "{caption}";

/// Service-level defaults for narrative generation.
///
/// Captured once at construction and never mutated; per-request
/// [`NarrativeOverrides`] are layered on top with [`GenerationParams::resolve`].
///
/// # Examples
///
/// ```
/// use storyteller_core::{GenerationParams, NarrativeOverrides};
///
/// let defaults = GenerationParams::builder()
///     .max_tokens(200)
///     .temperature(0.7)
///     .build();
///
/// let overrides = NarrativeOverrides::default().with_temperature(0.0);
/// let effective = defaults.resolve(&overrides);
///
/// assert_eq!(*effective.temperature(), 0.0);
/// assert_eq!(*effective.max_tokens(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerationParams {
    /// Prompt template containing `{caption}`
    template: String,
    /// Maximum tokens in the generated narrative
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            template: "Create an engaging narrative based on this scene: {caption}".to_string(),
            max_tokens: 200,
            temperature: 0.7,
        }
    }
}

impl GenerationParams {
    /// Creates a new parameter builder.
    pub fn builder() -> GenerationParamsBuilder {
        GenerationParamsBuilder::default()
    }

    /// Layers `overrides` on top of these defaults.
    ///
    /// Only an absent override falls back. `Some(0)`, `Some(0.0)` and
    /// `Some("")` are kept as given.
    pub fn resolve(&self, overrides: &NarrativeOverrides) -> GenerationParams {
        GenerationParams {
            template: overrides
                .template
                .clone()
                .unwrap_or_else(|| self.template.clone()),
            max_tokens: overrides.max_tokens.unwrap_or(self.max_tokens),
            temperature: overrides.temperature.unwrap_or(self.temperature),
        }
    }

    /// Validates the defaults a service is about to run with.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.template.contains(CAPTION_PLACEHOLDER) {
            return Err(format!(
                "Prompt template must contain {}, got {:?}",
                CAPTION_PLACEHOLDER, self.template
            ));
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be in [0.0, 2.0], got {}",
                self.temperature
            ));
        }
        Ok(())
    }
}

/// Builder for `GenerationParams`.
#[derive(Debug, Default)]
pub struct GenerationParamsBuilder {
    template: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl GenerationParamsBuilder {
    /// Sets the prompt template.
    pub fn template(mut self, value: impl Into<String>) -> Self {
        self.template = Some(value.into());
        self
    }

    /// Sets the token limit.
    pub fn max_tokens(mut self, value: u32) -> Self {
        self.max_tokens = Some(value);
        self
    }

    /// Sets the temperature.
    pub fn temperature(mut self, value: f32) -> Self {
        self.temperature = Some(value);
        self
    }

    /// Builds the `GenerationParams`, filling gaps from [`GenerationParams::default`].
    pub fn build(self) -> GenerationParams {
        let defaults = GenerationParams::default();
        GenerationParams {
            template: self.template.unwrap_or(defaults.template),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
        }
    }
}

/// Per-request overrides for narrative generation.
///
/// `None` means the caller omitted the parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeOverrides {
    /// Replacement prompt template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Replacement token limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Replacement temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl NarrativeOverrides {
    /// Sets the template override.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets the token limit override.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the temperature override.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// True when no override is present.
    pub fn is_empty(&self) -> bool {
        self.template.is_none() && self.max_tokens.is_none() && self.temperature.is_none()
    }
}
