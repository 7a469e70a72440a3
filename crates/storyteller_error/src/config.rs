//! Service configuration errors.

/// Reasons the service configuration could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be read or merged
    #[display("Failed to load configuration: {}", _0)]
    Load(String),
    /// Merged sources did not match the expected shape
    #[display("Failed to parse configuration: {}", _0)]
    Deserialize(String),
    /// A key parsed but holds a value the service cannot run with
    #[display("Invalid setting {}: {}", key, reason)]
    Invalid {
        /// Dotted key, e.g. `speech.language`
        key: String,
        /// What is wrong with it
        reason: String,
    },
    /// The log filter or subscriber could not be installed
    #[display("Failed to initialize logging: {}", _0)]
    Logging(String),
}

impl ConfigErrorKind {
    /// Shorthand for [`ConfigErrorKind::Invalid`].
    pub fn invalid(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Configuration error with location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::invalid("server.port", "must not be 0"));
/// assert!(format!("{}", err).contains("Invalid setting server.port"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
