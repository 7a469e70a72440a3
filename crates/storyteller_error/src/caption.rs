//! Captioning error types.

/// Kinds of captioning errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CaptionErrorKind {
    /// Image path does not exist
    #[display("Image file not found: {}", _0)]
    ImageNotFound(String),
    /// Image exists but could not be read
    #[display("Failed to read image: {}", _0)]
    ImageRead(String),
    /// Transport failure talking to the captioning backend
    #[display("Failed to process image: {}", _0)]
    Http(String),
    /// Backend rejected or could not decode the image
    #[display("Failed to process image: backend returned {}: {}", status, message)]
    Inference {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Backend answered without any caption text
    #[display("Failed to process image: model returned an empty caption")]
    EmptyCaption,
}

/// Captioning error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Caption Error: {} at line {} in {}", kind, line, file)]
pub struct CaptionError {
    /// The kind of error that occurred
    pub kind: CaptionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CaptionError {
    /// Create a new caption error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CaptionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
