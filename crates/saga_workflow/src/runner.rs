//! One generation phase end to end: stream, continue, validate, retry.

use crate::{
    RequirementCatalog, SectionRetry, ThrottledUpdater, WorkflowConfig, append_resume_directive,
    build_resume_prompt, collect_stream_continuing,
};
use derive_getters::Getters;
use saga_core::{GenerationAttempt, PromptPhaseKey};
use saga_error::SagaResult;
use saga_interface::TextStreaming;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::{debug, info, instrument};

/// Result of a completed phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseOutput {
    /// Accepted output. Carries the resume directive when `truncated`.
    pub content: String,
    /// Generation attempts made under the section contract.
    pub attempts: u32,
    /// Continuations issued during the accepted attempt.
    pub continuations: u32,
    /// The accepted attempt was still cut short after every continuation.
    pub truncated: bool,
}

// Borrowed by the retry closure across awaits, so it must be Sync for `run` to stay Send.
#[derive(Debug, Default)]
struct AttemptStats {
    continuations: AtomicU32,
    truncated: AtomicBool,
}

impl AttemptStats {
    fn record(&self, continuations: u32, truncated: bool) {
        self.continuations.store(continuations, Ordering::Relaxed);
        self.truncated.store(truncated, Ordering::Relaxed);
    }
}

/// Drives a [`TextStreaming`] backend through the section contract of each phase.
///
/// # Examples
///
/// ```no_run
/// use saga_core::PromptPhaseKey;
/// use saga_interface::TextStreaming;
/// use saga_workflow::{PhaseRunner, WorkflowConfig};
///
/// # async fn example(driver: impl TextStreaming) -> saga_error::SagaResult<()> {
/// let runner = PhaseRunner::new(driver, WorkflowConfig::default());
/// let output = runner
///     .run(&PromptPhaseKey::ANALYSIS_RAW, "Analyze the manuscript.", |text| {
///         println!("{} chars so far", text.len());
///     })
///     .await?;
/// println!("{}", output.content);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Getters)]
pub struct PhaseRunner<D> {
    driver: D,
    catalog: RequirementCatalog,
    config: WorkflowConfig,
}

impl<D: TextStreaming> PhaseRunner<D> {
    /// Runner using the catalog described by `config`.
    pub fn new(driver: D, config: WorkflowConfig) -> Self {
        let catalog = config.catalog();
        Self {
            driver,
            catalog,
            config,
        }
    }

    /// Replace the requirement catalog.
    pub fn with_catalog(mut self, catalog: RequirementCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Generate `phase` from `prompt`, reporting running text to `on_update`.
    ///
    /// Updates are throttled to the configured interval and the final text of
    /// every attempt is always delivered.
    ///
    /// # Errors
    ///
    /// Backend and stream errors propagate unchanged. A phase whose sections
    /// are still missing after the attempt budget fails with
    /// [`saga_error::WorkflowErrorKind::MissingSections`].
    #[instrument(
        skip(self, prompt, on_update),
        fields(
            phase = %phase,
            provider = self.driver.provider_name(),
            model = self.driver.model_name(),
        )
    )]
    pub async fn run<F>(
        &self,
        phase: &PromptPhaseKey,
        prompt: &str,
        on_update: F,
    ) -> SagaResult<PhaseOutput>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let updater = ThrottledUpdater::new(self.config.stream_update_interval(), on_update);
        let stats = AttemptStats::default();
        let updater_ref = &updater;
        let stats_ref = &stats;

        let outcome = SectionRetry::new(&self.catalog)
            .with_max_attempts(*self.config.max_section_attempts())
            .run(prompt, phase, move |attempt| {
                self.generate_attempt(attempt, updater_ref, stats_ref)
            })
            .await?;

        let output = PhaseOutput {
            content: outcome.content,
            attempts: outcome.attempts,
            continuations: stats.continuations.load(Ordering::Relaxed),
            truncated: stats.truncated.load(Ordering::Relaxed),
        };
        info!(
            attempts = output.attempts,
            continuations = output.continuations,
            truncated = output.truncated,
            "Phase complete"
        );
        Ok(output)
    }

    async fn generate_attempt(
        &self,
        attempt: GenerationAttempt,
        updater: &ThrottledUpdater<String>,
        stats: &AttemptStats,
    ) -> SagaResult<String> {
        let task = attempt.into_prompt();
        let stream = self.driver.generate_stream(&task).await?;
        let streamed = collect_stream_continuing("", stream, Some(updater)).await?;

        let mut content = streamed.text;
        let mut truncated = streamed.truncated;
        let mut continuations = 0;

        while truncated && continuations < *self.config.max_continuations() {
            continuations += 1;
            debug!(continuations, chars = content.len(), "Continuing truncated output");

            let resume_prompt = build_resume_prompt(&task, &content);
            let stream = self.driver.generate_stream(&resume_prompt).await?;
            let streamed = collect_stream_continuing(&content, stream, Some(updater)).await?;

            content.push_str(&streamed.text);
            truncated = streamed.truncated;
        }

        stats.record(continuations, truncated);
        if truncated {
            Ok(append_resume_directive(&content))
        } else {
            Ok(content)
        }
    }
}
