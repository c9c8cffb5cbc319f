//! Tests for the phase runner over a scripted streaming backend.

use async_trait::async_trait;
use futures_util::stream;
use saga_core::{PromptPhaseKey, SectionRequirement};
use saga_error::{BackendError, SagaError, SagaResult, WorkflowErrorKind};
use saga_interface::{ChunkStream, FinishReason, StreamChunk, TextStreaming};
use saga_workflow::{PhaseRunner, RESUME_DIRECTIVE, RequirementCatalog, WorkflowConfig};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays one scripted response per call and records the prompts it receives.
#[derive(Default, Clone)]
struct ScriptedDriver {
    responses: Arc<Mutex<VecDeque<Vec<StreamChunk>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedDriver {
    fn new(responses: Vec<Vec<StreamChunk>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            prompts: Arc::default(),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextStreaming for ScriptedDriver {
    async fn generate_stream(&self, prompt: &str) -> SagaResult<ChunkStream> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let chunks = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BackendError::new("script exhausted").with_provider("scripted"))?;
        Ok(Box::pin(stream::iter(chunks.into_iter().map(Ok::<_, SagaError>))))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}

fn response(text: &str, reason: FinishReason) -> Vec<StreamChunk> {
    vec![StreamChunk::delta(text), StreamChunk::finished(reason)]
}

fn catalog() -> RequirementCatalog {
    RequirementCatalog::empty().with_phase(
        PromptPhaseKey::ANALYSIS_RAW,
        vec![SectionRequirement::new("A"), SectionRequirement::new("B")],
    )
}

fn config() -> WorkflowConfig {
    WorkflowConfig::default().with_stream_update_interval_ms(0)
}

#[tokio::test]
async fn test_truncated_output_is_continued() {
    let driver = ScriptedDriver::new(vec![
        response("【A】\nalpha ", FinishReason::Length),
        response("【B】\nbeta", FinishReason::Stop),
    ]);
    let runner = PhaseRunner::new(driver.clone(), config()).with_catalog(catalog());
    let updates = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&updates);

    let output = runner
        .run(&PromptPhaseKey::ANALYSIS_RAW, "Analyze.", move |text| {
            sink.lock().unwrap().push(text);
        })
        .await
        .unwrap();

    assert_eq!(output.content, "【A】\nalpha 【B】\nbeta");
    assert_eq!(output.attempts, 1);
    assert_eq!(output.continuations, 1);
    assert!(!output.truncated);

    let prompts = driver.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], "Analyze.");
    assert!(prompts[1].contains("Analyze."));
    assert!(prompts[1].contains("alpha"));

    let updates = updates.lock().unwrap();
    assert_eq!(updates.last().map(String::as_str), Some(output.content.as_str()));
}

#[tokio::test]
async fn test_continuation_budget_exhausted_keeps_directive() {
    let driver = ScriptedDriver::new(vec![
        response("The tide rose", FinishReason::Length),
        response(" and rose", FinishReason::Length),
    ]);
    let runner = PhaseRunner::new(driver.clone(), config().with_max_continuations(1));

    let output = runner
        .run(&PromptPhaseKey::CHAPTER_GENERATION, "Write.", |_| {})
        .await
        .unwrap();

    assert_eq!(output.continuations, 1);
    assert!(output.truncated);
    assert!(output.content.starts_with("The tide rose and rose"));
    assert!(output.content.ends_with(RESUME_DIRECTIVE));
    assert_eq!(driver.prompts().len(), 2);
}

#[tokio::test]
async fn test_missing_sections_trigger_corrective_attempt() {
    let driver = ScriptedDriver::new(vec![
        response("【A】\nalpha", FinishReason::Stop),
        response("【A】\nalpha\n【B】\nbeta", FinishReason::Stop),
    ]);
    let runner = PhaseRunner::new(driver.clone(), config()).with_catalog(catalog());

    let output = runner
        .run(&PromptPhaseKey::ANALYSIS_RAW, "Analyze.", |_| {})
        .await
        .unwrap();

    assert_eq!(output.attempts, 2);
    assert_eq!(output.continuations, 0);

    let prompts = driver.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].starts_with("Analyze."));
    assert!(prompts[1].contains("【B】"));
}

#[tokio::test]
async fn test_exhausted_attempts_fail_with_missing_sections() {
    let driver = ScriptedDriver::new(vec![
        response("nothing", FinishReason::Stop),
        response("still nothing", FinishReason::Stop),
    ]);
    let runner = PhaseRunner::new(driver, config()).with_catalog(catalog());

    let err = runner
        .run(&PromptPhaseKey::ANALYSIS_RAW, "Analyze.", |_| {})
        .await
        .unwrap_err();

    let workflow = err.as_workflow().expect("workflow error");
    assert!(matches!(
        workflow.kind(),
        WorkflowErrorKind::MissingSections { attempts: 2, .. }
    ));
    assert_eq!(workflow.missing_sections(), ["A", "B"]);
}

#[tokio::test]
async fn test_backend_errors_propagate() {
    let runner = PhaseRunner::new(ScriptedDriver::default(), config()).with_catalog(catalog());

    let err = runner
        .run(&PromptPhaseKey::ANALYSIS_RAW, "Analyze.", |_| {})
        .await
        .unwrap_err();

    let saga_error::SagaErrorKind::Backend(backend) = err.kind() else {
        panic!("expected a backend error, got {err}");
    };
    assert_eq!(backend.provider.as_deref(), Some("scripted"));
    assert!(backend.message.contains("script exhausted"));
}

#[tokio::test]
async fn test_run_on_a_spawned_task() {
    let driver = ScriptedDriver::new(vec![
        response("The tide rose", FinishReason::Length),
        response(" and fell.", FinishReason::Stop),
    ]);
    let runner = PhaseRunner::new(driver, config());
    let phase = PromptPhaseKey::CHAPTER_GENERATION;

    let output = tokio::spawn(async move { runner.run(&phase, "Write.", |_| {}).await })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(output.content, "The tide rose and fell.");
    assert_eq!(output.continuations, 1);
    assert!(!output.truncated);
}
