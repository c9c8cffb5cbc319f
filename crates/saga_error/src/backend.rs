//! Failures reported by the streaming text backend.

/// Error raised by a `TextStreaming` implementation.
///
/// The workflow never retries these. Section retry and the phase runner pass
/// them to the caller unchanged, so the provider name is kept for logs.
///
/// # Examples
///
/// ```
/// use saga_error::{BackendError, SagaError, SagaErrorKind};
///
/// let err: SagaError = BackendError::new("stream closed before the final chunk")
///     .with_provider("openai")
///     .into();
///
/// let SagaErrorKind::Backend(backend) = err.kind() else {
///     panic!("expected a backend error");
/// };
/// assert_eq!(backend.provider.as_deref(), Some("openai"));
/// assert!(err.to_string().contains("openai: stream closed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display(
    "Backend Error: {}: {} at line {} in {}",
    provider.as_deref().unwrap_or("unknown provider"),
    message,
    line,
    file
)]
pub struct BackendError {
    /// What the backend reported
    pub message: String,
    /// Provider that produced the failure, when known
    pub provider: Option<String>,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl BackendError {
    /// Backend failure raised at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            provider: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Attribute the failure to a provider.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}
