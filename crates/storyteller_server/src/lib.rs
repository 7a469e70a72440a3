//! HTTP service turning images into narrated stories.
//!
//! An uploaded image is stored, captioned, expanded into a short narrative
//! by a text-generation model and, on request, read aloud. The pieces:
//!
//! - [`AppConfig`] layered configuration ([`config`] module)
//! - [`init_logging`] tracing subscriber setup
//! - [`Pipeline`] stage orchestration over the capability traits
//! - [`create_router`] the axum API
//! - [`build_pipeline`] / [`spawn_audio_cleanup`] production wiring
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use storyteller_server::{AppConfig, AppState, build_pipeline, create_router};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load(None)?;
//! let pipeline = Arc::new(build_pipeline(&config)?);
//! let router = create_router(AppState::new(pipeline), config.server.max_upload_bytes);
//!
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.server.port)).await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod app;
pub mod config;
mod observability;
mod pipeline;

pub use api::{ApiError, AppState, DetailShape, create_router};
pub use app::{build_pipeline, spawn_audio_cleanup};
pub use crate::config::{
    AppConfig, AudioConfig, CaptioningSection, LoggingConfig, OpenAiSection, ServerConfig,
    SpeechSection, StorageConfig,
};
pub use observability::init_logging;
pub use pipeline::{CaptionOutcome, ImageUpload, Pipeline, ProcessOptions, ProcessOutcome};
pub use storyteller_error::PipelineError;
