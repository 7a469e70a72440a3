//! Capability traits for the external collaborators of the Storyteller pipeline.
//!
//! Captioning, text generation and speech synthesis are opaque services.
//! Each is reduced to a single async method so the pipeline can run against
//! real HTTP adapters in production and deterministic stand-ins in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{Captioner, Speaker, TextGenerator};
