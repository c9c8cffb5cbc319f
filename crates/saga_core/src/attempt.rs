//! Input handed to a caller-supplied generation function.

use crate::Heading;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One generation attempt within a section-contract retry loop.
///
/// `attempt_index` starts at 1. `missing_from_previous` carries the headings
/// the previous attempt failed to produce, and is empty on the first attempt.
///
/// # Examples
///
/// ```
/// use saga_core::GenerationAttempt;
///
/// let attempt = GenerationAttempt::first("Analyse the manuscript.");
/// assert_eq!(*attempt.attempt_index(), 1);
/// assert!(attempt.is_first());
/// assert!(attempt.missing_from_previous().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerationAttempt {
    /// Prompt to send for this attempt (retry instructions already appended)
    prompt: String,
    /// 1-based attempt number
    attempt_index: u32,
    /// Headings missing from the previous attempt's output
    missing_from_previous: Vec<Heading>,
}

impl GenerationAttempt {
    /// Create an attempt. An index of 0 is raised to 1.
    pub fn new(
        prompt: impl Into<String>,
        attempt_index: u32,
        missing_from_previous: Vec<Heading>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            attempt_index: attempt_index.max(1),
            missing_from_previous,
        }
    }

    /// The first attempt for a prompt.
    pub fn first(prompt: impl Into<String>) -> Self {
        Self::new(prompt, 1, Vec::new())
    }

    /// Whether this is the first attempt.
    pub fn is_first(&self) -> bool {
        self.attempt_index == 1
    }

    /// Consume the attempt, keeping only its prompt.
    pub fn into_prompt(self) -> String {
        self.prompt
    }
}
