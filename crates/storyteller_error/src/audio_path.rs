//! Audio artifact lookup errors.

/// Reasons a requested audio filename was refused.
///
/// `Malformed` and `UnsupportedFormat` are decided lexically, before the
/// filesystem is touched. `NotFound` and `NotAFile` come from probing the
/// audio directory on retrieval, and `AlreadyExists` from a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AudioPathErrorKind {
    /// Name contains `..`, a path separator, a quote or a control character
    #[display("Invalid file format: '{}' must be a bare file name", _0)]
    Malformed(String),
    /// Name does not carry the `.mp3` extension
    #[display("Invalid file format: '{}' is not supported, only MP3 files can be retrieved", _0)]
    UnsupportedFormat(String),
    /// Nothing exists under that name
    #[display("Audio file not found: {}", _0)]
    NotFound(String),
    /// Entry exists but is a directory or other non-regular file
    #[display("Invalid audio file: '{}' is not a regular file", _0)]
    NotAFile(String),
    /// A save would replace an artifact that is already stored
    #[display("Audio file already exists: {}", _0)]
    AlreadyExists(String),
}

/// Audio lookup error with location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{AudioPathError, AudioPathErrorKind};
///
/// let err = AudioPathError::new(AudioPathErrorKind::NotFound("missing.mp3".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Audio Path Error: {} at line {} in {}", kind, line, file)]
pub struct AudioPathError {
    /// The kind of error that occurred
    pub kind: AudioPathErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AudioPathError {
    /// Create a new audio path error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AudioPathErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
