//! Resume prompt command.

use super::read_input;
use saga::{SagaResult, build_resume_prompt, has_resume_directive, strip_resume_directive};
use std::path::Path;
use tracing::{debug, instrument};

/// Print the continuation prompt for a stored output.
#[instrument(fields(task = %task_file.display(), output = %output_file.display()))]
pub fn resume_prompt(task_file: &Path, output_file: &Path) -> SagaResult<()> {
    let task = read_input(task_file)?;
    let stored = read_input(output_file)?;

    debug!(marked = has_resume_directive(&stored), "Loaded stored output");
    let existing = strip_resume_directive(&stored).unwrap_or_default();

    println!("{}", build_resume_prompt(task.trim(), &existing));
    Ok(())
}
