//! Core data types for the Storyteller pipeline.
//!
//! This crate provides the values passed between pipeline stages: chat
//! messages for the text-generation backend, generation parameters with
//! their per-request overrides, and validated language codes for speech.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod language;
mod message;
mod params;
mod request;
mod role;

pub use language::LanguageCode;
pub use message::ChatMessage;
pub use params::{CAPTION_PLACEHOLDER, GenerationParams, GenerationParamsBuilder, NarrativeOverrides};
pub use request::{CompletionRequest, CompletionRequestBuilder, CompletionRequestBuilderError};
pub use role::Role;
