//! Narrative error types.

/// Specific error conditions for narrative generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum NarrativeErrorKind {
    /// Input rejected before any model call was made
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),
    /// The text-generation collaborator failed
    #[display("Failed to generate narrative: {}", _0)]
    Generation(String),
}

/// Error type for narrative operations.
///
/// # Examples
///
/// ```
/// use storyteller_error::{NarrativeError, NarrativeErrorKind};
///
/// let err = NarrativeError::new(NarrativeErrorKind::Generation("rate limited".to_string()));
/// assert!(format!("{}", err).contains("rate limited"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Narrative Error: {} at line {} in {}", kind, line, file)]
pub struct NarrativeError {
    /// The specific error condition
    pub kind: NarrativeErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl NarrativeError {
    /// Create a new NarrativeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NarrativeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the caller supplied unusable input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind, NarrativeErrorKind::InvalidInput(_))
    }
}
