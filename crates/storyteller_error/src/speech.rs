//! Speech synthesis error types.

/// Kinds of speech synthesis errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SpeechErrorKind {
    /// Nothing to synthesize
    #[display("Text cannot be empty")]
    EmptyText,
    /// Language code rejected by the synthesizer
    #[display("Unsupported language: {}", _0)]
    UnsupportedLanguage(String),
    /// Transport failure talking to the synthesis backend
    #[display("Failed to convert text to speech: {}", _0)]
    Http(String),
    /// Backend answered with a non-success status
    #[display("Failed to convert text to speech: backend returned {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
}

/// Speech synthesis error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speech Error: {} at line {} in {}", kind, line, file)]
pub struct SpeechError {
    /// The kind of error that occurred
    pub kind: SpeechErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SpeechError {
    /// Create a new speech error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SpeechErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
