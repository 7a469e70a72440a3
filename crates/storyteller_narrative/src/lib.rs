//! Prompt construction and narrative generation for Storyteller.
//!
//! Two pieces live here:
//!
//! - [`build_prompt`] substitutes a caption into a template and keeps the
//!   result within [`MAX_PROMPT_LENGTH`] by shortening the caption, never
//!   the template.
//! - [`NarrativeGenerator`] resolves per-request overrides against service
//!   defaults, builds the prompt and asks a [`TextGenerator`] for one
//!   completion.
//!
//! # Example
//!
//! ```rust,ignore
//! use storyteller_core::{GenerationParams, NarrativeOverrides};
//! use storyteller_models::{OpenAiClient, OpenAiConfig};
//! use storyteller_narrative::NarrativeGenerator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new(OpenAiConfig::from_env()?)?;
//! let generator = NarrativeGenerator::new(client, GenerationParams::default());
//!
//! let narrative = generator
//!     .generate("a lighthouse at dusk", &NarrativeOverrides::default())
//!     .await?;
//! println!("{narrative}");
//! # Ok(())
//! # }
//! ```
//!
//! [`TextGenerator`]: storyteller_interface::TextGenerator

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod prompt;

pub use generator::{NarrativeGenerator, SYSTEM_INSTRUCTION};
pub use prompt::{DEFAULT_PROMPT_TEMPLATE, ELLIPSIS, MAX_PROMPT_LENGTH, build_prompt};
pub use storyteller_error::{NarrativeError, NarrativeErrorKind};
