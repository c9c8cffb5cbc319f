//! Errors from loading layered workflow settings.

/// Settings could not be read, merged, or deserialized.
///
/// `path` names the offending file when a single file is to blame. Failures
/// of the merged layers (bundled defaults, home and working directory) carry
/// no path.
///
/// # Examples
///
/// ```
/// use saga_error::ConfigError;
///
/// let err = ConfigError::in_file("saga.toml", "invalid type for breakdown_chunk_size");
/// assert_eq!(err.path.as_deref(), Some("saga.toml"));
/// assert!(err.message.starts_with("saga.toml: "));
///
/// let merged = ConfigError::new("max_section_attempts must be at least 1");
/// assert!(merged.path.is_none());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Description, prefixed with the path when there is one
    pub message: String,
    /// Settings file at fault
    pub path: Option<String>,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Error about the merged settings as a whole.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            path: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error attributed to one settings file.
    #[track_caller]
    pub fn in_file(path: impl std::fmt::Display, message: impl std::fmt::Display) -> Self {
        let path = path.to_string();
        let mut err = Self::new(format!("{}: {}", path, message));
        err.path = Some(path);
        err
    }
}
