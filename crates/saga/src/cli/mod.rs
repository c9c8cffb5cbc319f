//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the saga binary.

mod breakdown;
mod commands;
mod inspect;
mod resume;

pub use breakdown::{compose_breakdown, plan_breakdown};
pub use commands::{Cli, Commands, OutputFormat};
pub use inspect::{parse_analysis, validate_sections};
pub use resume::resume_prompt;

use saga::{SagaResult, StorageError};
use std::path::Path;

/// Read a UTF-8 input file.
fn read_input(path: &Path) -> SagaResult<String> {
    std::fs::read_to_string(path).map_err(|e| StorageError::from_io(path.display(), &e).into())
}

/// Read an optional input file; absent paths read as empty.
fn read_optional(path: Option<&Path>) -> SagaResult<String> {
    path.map(read_input).transpose().map(Option::unwrap_or_default)
}
