//! Error types for the saga generation workflow.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use saga_error::{SagaResult, WorkflowError, WorkflowErrorKind};
//!
//! fn read_stream() -> SagaResult<String> {
//!     Err(WorkflowError::new(WorkflowErrorKind::EmptyStream))?
//! }
//!
//! match read_stream() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod builder;
mod config;
mod error;
mod json;
mod storage;
mod workflow;

pub use backend::BackendError;
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{SagaError, SagaErrorKind, SagaResult};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
pub use workflow::{WorkflowError, WorkflowErrorKind};
