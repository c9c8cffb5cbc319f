//! Errors from rendering machine-readable reports.

/// A report could not be rendered as JSON.
///
/// `subject` names the report, such as a section validation or a parsed
/// analysis, so the CLI can say which output failed.
///
/// # Examples
///
/// ```
/// use saga_error::{JsonError, SagaError};
///
/// let err = JsonError::new("analysis report", "key must be a string");
/// assert_eq!(err.subject, "analysis report");
///
/// let err: SagaError = err.into();
/// assert!(err.to_string().contains("cannot render analysis report"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: cannot render {}: {} at line {} in {}", subject, message, line, file)]
pub struct JsonError {
    /// Report being rendered
    pub subject: &'static str,
    /// Serializer message
    pub message: String,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl JsonError {
    /// Rendering of `subject` failed with `message`.
    #[track_caller]
    pub fn new(subject: &'static str, message: impl std::fmt::Display) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject,
            message: message.to_string(),
            line: location.line(),
            file: location.file(),
        }
    }
}
