//! Mapping of pipeline failures to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storyteller_error::{
    AudioPathError, AudioPathErrorKind, NarrativeErrorKind, PipelineError, StorytellerError,
    StorytellerErrorKind,
};

/// Where the message sits under `detail` in an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailShape {
    /// `{"detail": {"error": "<message>"}}`
    #[default]
    Nested,
    /// `{"detail": "<message>"}`, used by the upload and caption routes
    Plain,
}

/// An error response: status plus a client-facing message.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}: {}", status, message)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    shape: DetailShape,
}

impl ApiError {
    /// Create an error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            shape: DetailShape::default(),
        }
    }

    /// Same error, rendered with `shape`.
    pub fn with_shape(self, shape: DetailShape) -> Self {
        Self { shape, ..self }
    }

    /// 400 with `message`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 with `message`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Client-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// JSON body for this error.
    pub fn body(&self) -> serde_json::Value {
        match self.shape {
            DetailShape::Nested => json!({"detail": {"error": self.message}}),
            DetailShape::Plain => json!({"detail": self.message}),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "Request failed");
        } else {
            tracing::debug!(status = %self.status, message = %self.message, "Request rejected");
        }
        (self.status, Json(self.body())).into_response()
    }
}

fn audio_path_status(kind: &AudioPathErrorKind) -> StatusCode {
    match kind {
        AudioPathErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
        AudioPathErrorKind::AlreadyExists(_) => StatusCode::CONFLICT,
        AudioPathErrorKind::Malformed(_)
        | AudioPathErrorKind::UnsupportedFormat(_)
        | AudioPathErrorKind::NotAFile(_) => StatusCode::BAD_REQUEST,
    }
}

impl From<AudioPathError> for ApiError {
    fn from(err: AudioPathError) -> Self {
        Self::new(audio_path_status(&err.kind), err.kind.to_string())
    }
}

/// Status and message for a wrapped error; the location suffix of the
/// wrapper is left out of the message.
impl From<StorytellerError> for ApiError {
    fn from(err: StorytellerError) -> Self {
        match err.kind() {
            StorytellerErrorKind::Upload(e) => Self::bad_request(e.kind.to_string()),
            StorytellerErrorKind::AudioPath(e) => {
                Self::new(audio_path_status(&e.kind), e.kind.to_string())
            }
            StorytellerErrorKind::Narrative(e) => narrative(&e.kind),
            StorytellerErrorKind::Storage(e) => Self::internal(e.kind.to_string()),
            StorytellerErrorKind::Caption(e) => Self::internal(e.kind.to_string()),
            StorytellerErrorKind::Model(e) => Self::internal(e.kind.to_string()),
            StorytellerErrorKind::Speech(e) => Self::internal(e.kind.to_string()),
            StorytellerErrorKind::Config(e) => Self::internal(e.kind.to_string()),
        }
    }
}

fn narrative(kind: &NarrativeErrorKind) -> ApiError {
    match kind {
        NarrativeErrorKind::InvalidInput(_) => ApiError::bad_request(kind.to_string()),
        NarrativeErrorKind::Generation(_) => ApiError::internal(kind.to_string()),
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        tracing::warn!(stage = err.stage(), error = %err, "Pipeline failed");
        match err {
            PipelineError::Upload(e) | PipelineError::Speech(e) => e.into(),
            PipelineError::Caption(e) => Self::internal(e.kind.to_string()),
            PipelineError::Narrative(e) => narrative(&e.kind),
        }
    }
}
