//! Top-level error wrapper types.

use crate::{BackendError, BuilderError, ConfigError, JsonError, StorageError, WorkflowError};

/// Every error condition the saga crates can surface.
///
/// # Examples
///
/// ```
/// use saga_error::{SagaError, BackendError};
///
/// let backend_err = BackendError::new("connection reset");
/// let err: SagaError = backend_err.into();
/// assert!(format!("{}", err).contains("Backend Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SagaErrorKind {
    /// Generation backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// JSON serialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Storage error (reading input files)
    #[from(StorageError)]
    Storage(StorageError),
    /// Workflow error (section contract, stream protocol)
    #[from(WorkflowError)]
    Workflow(WorkflowError),
}

/// Saga error with kind discrimination.
///
/// # Examples
///
/// ```
/// use saga_error::{SagaResult, ConfigError};
///
/// fn might_fail() -> SagaResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Saga Error: {}", _0)]
pub struct SagaError(Box<SagaErrorKind>);

impl SagaError {
    /// Create a new error from a kind.
    pub fn new(kind: SagaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SagaErrorKind {
        &self.0
    }

    /// The workflow error inside, if this is one.
    pub fn as_workflow(&self) -> Option<&crate::WorkflowError> {
        match self.kind() {
            SagaErrorKind::Workflow(err) => Some(err),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to SagaErrorKind
impl<T> From<T> for SagaError
where
    T: Into<SagaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for saga operations.
pub type SagaResult<T> = std::result::Result<T, SagaError>;
