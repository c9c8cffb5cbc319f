//! Bounded retry-with-feedback for phases under a section contract.
//!
//! Free-form model output sometimes drops required sections under length
//! pressure. One corrective attempt that names the gap recovers most of
//! these at bounded cost.

use crate::{RequirementCatalog, validate_required_sections};
use saga_core::{GenerationAttempt, Heading, PromptPhaseKey};
use saga_error::{SagaResult, WorkflowError, WorkflowErrorKind};
use std::future::Future;
use tracing::{debug, info, warn};

/// Attempts per enforced phase: the first try plus one corrective retry.
pub const DEFAULT_MAX_SECTION_ATTEMPTS: u32 = 2;

/// Result of a successful section-checked generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryOutcome {
    /// Output of the accepted attempt.
    pub content: String,
    /// Number of attempts made (1-based).
    pub attempts: u32,
}

/// Runs generation functions under the section contract of their phase.
///
/// # Examples
///
/// ```
/// use saga_core::PromptPhaseKey;
/// use saga_workflow::{RequirementCatalog, SectionRetry};
///
/// # #[tokio::main]
/// # async fn main() {
/// let catalog = RequirementCatalog::builtin();
/// let outcome = SectionRetry::new(&catalog)
///     .run("Write chapter 3.", &PromptPhaseKey::CHAPTER_GENERATION, |attempt| async move {
///         Ok::<_, saga_error::SagaError>(format!("Prose for: {}", attempt.prompt()))
///     })
///     .await
///     .unwrap();
/// assert_eq!(outcome.attempts, 1);
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SectionRetry<'a> {
    catalog: &'a RequirementCatalog,
    max_attempts: u32,
}

impl<'a> SectionRetry<'a> {
    /// Coordinator with the default attempt budget.
    pub fn new(catalog: &'a RequirementCatalog) -> Self {
        Self {
            catalog,
            max_attempts: DEFAULT_MAX_SECTION_ATTEMPTS,
        }
    }

    /// Override the attempt budget. Values below 1 are treated as 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// The effective attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Generate for `phase`, retrying while required sections are missing.
    ///
    /// Exempt phases call `generate` exactly once without validation. Enforced
    /// phases call it at most `max_attempts` times, strictly in sequence; each
    /// call receives the headings missing from the previous attempt. Errors
    /// returned by `generate` are propagated immediately and never retried.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowErrorKind::MissingSections`] when the final attempt
    /// still lacks required headings, or any error returned by `generate`.
    #[tracing::instrument(
        skip(self, prompt, generate),
        fields(phase = %phase, max_attempts = self.max_attempts)
    )]
    pub async fn run<F, Fut>(
        &self,
        prompt: &str,
        phase: &PromptPhaseKey,
        mut generate: F,
    ) -> SagaResult<RetryOutcome>
    where
        F: FnMut(GenerationAttempt) -> Fut,
        Fut: Future<Output = SagaResult<String>>,
    {
        let Some(requirements) = self.catalog.requirements(phase) else {
            debug!("Phase has no section contract, generating once");
            let content = generate(GenerationAttempt::first(prompt)).await?;
            return Ok(RetryOutcome {
                content,
                attempts: 1,
            });
        };

        let mut current_prompt = prompt.to_string();
        let mut previous_missing: Vec<Heading> = Vec::new();

        let mut attempt = 1;
        loop {
            let request =
                GenerationAttempt::new(current_prompt.clone(), attempt, previous_missing.clone());
            let content = generate(request).await?;
            let validation = validate_required_sections(&content, requirements);

            if validation.ok {
                if attempt > 1 {
                    info!(attempt, "Section contract satisfied after retry");
                }
                return Ok(RetryOutcome {
                    content,
                    attempts: attempt,
                });
            }

            if attempt >= self.max_attempts {
                warn!(
                    attempt,
                    missing_count = validation.missing.len(),
                    "Section contract still unsatisfied, giving up"
                );
                return Err(WorkflowError::new(WorkflowErrorKind::MissingSections {
                    phase: phase.to_string(),
                    attempts: attempt,
                    missing: validation
                        .missing
                        .iter()
                        .map(|heading| heading.label().to_string())
                        .collect(),
                })
                .into());
            }

            warn!(
                attempt,
                missing_count = validation.missing.len(),
                "Output is missing required sections, retrying with feedback"
            );
            current_prompt = build_retry_prompt(prompt, &validation.missing);
            previous_missing = validation.missing;
            attempt += 1;
        }
    }
}

/// Run `generate` under the section contract of `phase`.
///
/// Convenience wrapper over [`SectionRetry`].
pub async fn generate_with_section_retry<F, Fut>(
    catalog: &RequirementCatalog,
    prompt: &str,
    phase: &PromptPhaseKey,
    generate: F,
    max_attempts: u32,
) -> SagaResult<RetryOutcome>
where
    F: FnMut(GenerationAttempt) -> Fut,
    Fut: Future<Output = SagaResult<String>>,
{
    SectionRetry::new(catalog)
        .with_max_attempts(max_attempts)
        .run(prompt, phase, generate)
        .await
}

/// Append a corrective instruction naming the missing headings to `base_prompt`.
///
/// # Examples
///
/// ```
/// use saga_core::Heading;
/// use saga_workflow::build_retry_prompt;
///
/// let prompt = build_retry_prompt("Analyse.", &[Heading::from("Characters")]);
/// assert!(prompt.starts_with("Analyse."));
/// assert!(prompt.contains("【Characters】"));
/// ```
pub fn build_retry_prompt(base_prompt: &str, missing: &[Heading]) -> String {
    let headings = missing
        .iter()
        .map(Heading::bracketed)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{}\n\n[Format correction] The previous response was missing these required sections: {}.\n\
         Regenerate the complete response. Every required section must start with its heading \
         written exactly as shown, including the brackets. Do not mention this correction.",
        base_prompt.trim_end(),
        headings
    )
}
