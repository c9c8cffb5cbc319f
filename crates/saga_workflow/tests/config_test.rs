//! Tests for workflow configuration loading.

use saga_core::{PromptPhaseKey, SectionRequirement};
use saga_workflow::{SagaConfig, WorkflowConfig};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_load_bundled_defaults() {
    let config = SagaConfig::load().unwrap();
    let workflow = config.workflow();

    assert_eq!(*workflow.max_section_attempts(), 2);
    assert_eq!(*workflow.breakdown_chunk_size(), 5);
    assert_eq!(*workflow.stream_update_interval_ms(), 100);
    assert_eq!(*workflow.max_continuations(), 2);
    assert!(workflow.sections().is_empty());
}

#[test]
fn test_default_matches_bundled_file() {
    let loaded = SagaConfig::load().unwrap();
    assert_eq!(loaded.workflow(), &WorkflowConfig::default());
}

#[test]
fn test_from_file_with_partial_workflow() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[workflow]
max_section_attempts = 3
stream_update_interval_ms = 0
"#
    )
    .unwrap();

    let config = SagaConfig::from_file(file.path()).unwrap().into_workflow();

    assert_eq!(*config.max_section_attempts(), 3);
    assert_eq!(config.stream_update_interval(), Duration::ZERO);
    // Unspecified keys fall back to defaults
    assert_eq!(*config.breakdown_chunk_size(), 5);
    assert_eq!(*config.max_continuations(), 2);
}

#[test]
fn test_from_file_section_overrides() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[workflow]

[[workflow.sections.analysisRaw]]
name = "Plot Summary"
aliases = ["Story Summary"]

[[workflow.sections.analysisRaw]]
name = "Themes"

[[workflow.sections.contextCompression]]
name = "Context"
"#
    )
    .unwrap();

    let config = SagaConfig::from_file(file.path()).unwrap().into_workflow();
    let catalog = config.catalog();

    let analysis = catalog.requirements(&PromptPhaseKey::ANALYSIS_RAW).unwrap();
    assert_eq!(analysis.len(), 2);
    assert_eq!(analysis[0].name().label(), "Plot Summary");
    assert_eq!(analysis[0].aliases().len(), 1);
    assert!(analysis[1].aliases().is_empty());

    assert!(catalog.is_enforced(&PromptPhaseKey::CONTEXT_COMPRESSION));
    // Untouched phases keep their built-in contracts
    assert!(catalog.is_enforced(&PromptPhaseKey::BREAKDOWN_META));
}

#[test]
fn test_from_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SagaConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    let saga_error::SagaErrorKind::Config(config_err) = err.kind() else {
        panic!("expected a config error, got {err}");
    };
    assert!(config_err.path.as_deref().unwrap().ends_with("absent.toml"));
}

#[test]
fn test_invalid_settings_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saga.toml");
    std::fs::write(&path, "[workflow]\nbreakdown_chunk_size = \"many\"\n").unwrap();

    let err = SagaConfig::from_file(&path).unwrap_err();
    let saga_error::SagaErrorKind::Config(config_err) = err.kind() else {
        panic!("expected a config error, got {err}");
    };
    assert_eq!(config_err.path.as_deref(), Some(path.display().to_string().as_str()));
    assert!(config_err.message.contains("invalid settings"));
}

#[test]
fn test_programmatic_overrides() {
    let config = WorkflowConfig::default()
        .with_max_section_attempts(4)
        .with_breakdown_chunk_size(3)
        .with_sections("chapterGeneration", vec![SectionRequirement::new("Scene")]);

    assert_eq!(*config.max_section_attempts(), 4);
    assert_eq!(*config.breakdown_chunk_size(), 3);
    assert!(config.catalog().is_enforced(&PromptPhaseKey::CHAPTER_GENERATION));
}
