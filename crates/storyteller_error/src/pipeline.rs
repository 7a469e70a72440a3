//! Pipeline stage errors.

use crate::{CaptionError, NarrativeError, StorytellerError};

/// Failure of one pipeline stage.
///
/// The variant names the stage; the payload is the error that stage
/// produced, untouched. Upload and speech carry a [`StorytellerError`]
/// because each spans more than one family: validation, storage, and for
/// speech, synthesis.
///
/// # Examples
///
/// ```
/// use storyteller_error::{CaptionError, CaptionErrorKind, PipelineError};
///
/// let err = PipelineError::Caption(CaptionError::new(CaptionErrorKind::EmptyCaption));
/// assert_eq!(err.stage(), "caption");
/// assert!(err.to_string().starts_with("Caption stage failed"));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PipelineError {
    /// Persisting the source image failed
    #[display("Upload stage failed: {}", _0)]
    Upload(StorytellerError),
    /// The captioning collaborator failed
    #[display("Caption stage failed: {}", _0)]
    Caption(CaptionError),
    /// Narrative generation failed
    #[display("Narrative stage failed: {}", _0)]
    Narrative(NarrativeError),
    /// Speech synthesis or writing the audio file failed
    #[display("Speech stage failed: {}", _0)]
    Speech(StorytellerError),
}

impl PipelineError {
    /// Short stage name, for logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Upload(_) => "upload",
            Self::Caption(_) => "caption",
            Self::Narrative(_) => "narrative",
            Self::Speech(_) => "speech",
        }
    }
}
