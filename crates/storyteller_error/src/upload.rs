//! Upload validation errors.

/// Reasons an uploaded image was refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum UploadErrorKind {
    /// Extension is not on the allow-list
    #[display("File type {} not allowed. Allowed types: {}", extension, allowed)]
    InvalidFileType {
        /// Extension as supplied (lowercased, may be empty)
        extension: String,
        /// Comma separated allow-list
        allowed: String,
    },
    /// Upload carried no file name
    #[display("Uploaded file has no name")]
    MissingFilename,
}

/// Upload error with location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{UploadError, UploadErrorKind};
///
/// let err = UploadError::new(UploadErrorKind::InvalidFileType {
///     extension: ".txt".to_string(),
///     allowed: ".jpg, .jpeg, .png".to_string(),
/// });
/// assert!(format!("{}", err).contains("not allowed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upload Error: {} at line {} in {}", kind, line, file)]
pub struct UploadError {
    /// The kind of error that occurred
    pub kind: UploadErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UploadError {
    /// Create a new upload error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UploadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
