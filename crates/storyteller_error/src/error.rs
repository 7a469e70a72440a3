//! Top-level error wrapper types.

use crate::{
    AudioPathError, CaptionError, ConfigError, ModelError, NarrativeError, SpeechError,
    StorageError, UploadError,
};

/// Every error family in the workspace.
///
/// # Examples
///
/// ```
/// use storyteller_error::{ConfigError, ConfigErrorKind, StorytellerError};
///
/// let err: StorytellerError =
///     ConfigError::new(ConfigErrorKind::invalid("server.port", "must not be 0")).into();
/// assert!(format!("{}", err).contains("server.port"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorytellerErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Upload persistence error
    #[from(UploadError)]
    Upload(UploadError),
    /// Storage I/O error
    #[from(StorageError)]
    Storage(StorageError),
    /// Captioning error
    #[from(CaptionError)]
    Caption(CaptionError),
    /// Text-generation backend error
    #[from(ModelError)]
    Model(ModelError),
    /// Narrative generation error
    #[from(NarrativeError)]
    Narrative(NarrativeError),
    /// Speech synthesis error
    #[from(SpeechError)]
    Speech(SpeechError),
    /// Audio artifact lookup error
    #[from(AudioPathError)]
    AudioPath(AudioPathError),
}

/// Storyteller error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyteller Error: {}", _0)]
pub struct StorytellerError(Box<StorytellerErrorKind>);

impl StorytellerError {
    /// Create a new error from a kind.
    pub fn new(kind: StorytellerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorytellerErrorKind {
        &self.0
    }
}

impl<T> From<T> for StorytellerError
where
    T: Into<StorytellerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyteller operations.
pub type StorytellerResult<T> = std::result::Result<T, StorytellerError>;
