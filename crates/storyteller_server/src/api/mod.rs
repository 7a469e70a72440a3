//! HTTP API.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /health` | Liveness probe |
//! | `POST /upload/` | Store an image |
//! | `POST /process/` | Store and caption an image |
//! | `POST /process_with_narrative/` | Full pipeline, optional speech |
//! | `GET /audio/:filename` | Download synthesized speech |
//!
//! Errors from `/upload/` and `/process/` are returned as
//! `{"detail": "<message>"}`; the narrative and audio routes nest the message
//! as `{"detail": {"error": "<message>"}}`.

mod error;
mod form;
mod handlers;

pub use error::{ApiError, DetailShape};

use crate::Pipeline;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Creates new API state.
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }

    /// The pipeline requests run through.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

/// Creates the API router.
///
/// Request bodies larger than `max_upload_bytes` are rejected with 413.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/upload/", post(handlers::upload))
        .route("/process/", post(handlers::process))
        .route(
            "/process_with_narrative/",
            post(handlers::process_with_narrative),
        )
        .route("/audio/:filename", get(handlers::get_audio))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
