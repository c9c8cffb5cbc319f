//! Generation workflow error types.

use std::fmt;

/// Specific error conditions raised by the generation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WorkflowErrorKind {
    /// Required section headings were still missing after the attempt budget.
    MissingSections {
        /// Phase key whose section contract failed
        phase: String,
        /// Number of generation attempts made
        attempts: u32,
        /// Literal names of the unsatisfied requirements, in catalog order
        missing: Vec<String>,
    },
    /// A stream ended without yielding any chunk.
    EmptyStream,
}

impl fmt::Display for WorkflowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowErrorKind::MissingSections {
                phase,
                attempts,
                missing,
            } => {
                let headings = missing
                    .iter()
                    .map(|name| format!("【{}】", name))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "Phase '{}' is missing required sections after {} attempt(s): {}",
                    phase, attempts, headings
                )
            }
            WorkflowErrorKind::EmptyStream => {
                write!(f, "Generation stream ended without producing any output")
            }
        }
    }
}

/// Error type for workflow operations.
///
/// # Examples
///
/// ```
/// use saga_error::{WorkflowError, WorkflowErrorKind};
///
/// let err = WorkflowError::new(WorkflowErrorKind::MissingSections {
///     phase: "analysisRaw".to_string(),
///     attempts: 2,
///     missing: vec!["Characters".to_string(), "Open Threads".to_string()],
/// });
/// let message = format!("{}", err);
/// assert!(message.contains("【Characters】, 【Open Threads】"));
/// assert_eq!(err.missing_sections(), ["Characters", "Open Threads"]);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Workflow Error: {} at line {} in {}", kind, line, file)]
pub struct WorkflowError {
    /// The specific error condition
    pub kind: WorkflowErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl WorkflowError {
    /// Create a new WorkflowError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkflowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WorkflowErrorKind {
        &self.kind
    }

    /// Headings still missing when the section contract failed.
    ///
    /// Empty for every other error condition.
    pub fn missing_sections(&self) -> &[String] {
        match &self.kind {
            WorkflowErrorKind::MissingSections { missing, .. } => missing,
            WorkflowErrorKind::EmptyStream => &[],
        }
    }
}
