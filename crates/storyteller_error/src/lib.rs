//! Error types for the Storyteller pipeline.
//!
//! This crate provides the error types shared by every Storyteller crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Each pipeline stage owns one error family, so a failure always names the
//! stage it came from.
//!
//! # Examples
//!
//! ```
//! use storyteller_error::{NarrativeError, NarrativeErrorKind, StorytellerResult};
//!
//! fn narrate(caption: &str) -> StorytellerResult<String> {
//!     if caption.is_empty() {
//!         Err(NarrativeError::new(NarrativeErrorKind::InvalidInput(
//!             "Caption cannot be empty".to_string(),
//!         )))?
//!     }
//!     Ok(caption.to_uppercase())
//! }
//!
//! assert!(narrate("").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio_path;
mod caption;
mod config;
mod error;
mod model;
mod narrative;
mod pipeline;
mod speech;
mod storage;
mod upload;

pub use audio_path::{AudioPathError, AudioPathErrorKind};
pub use caption::{CaptionError, CaptionErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{StorytellerError, StorytellerErrorKind, StorytellerResult};
pub use model::{ModelError, ModelErrorKind};
pub use narrative::{NarrativeError, NarrativeErrorKind};
pub use pipeline::PipelineError;
pub use speech::{SpeechError, SpeechErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use upload::{UploadError, UploadErrorKind};
