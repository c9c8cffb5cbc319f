//! End-to-end tests for the saga binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Run the binary against an explicit config so user files never leak in.
fn saga(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_saga"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn default_config(dir: &TempDir) -> PathBuf {
    write(dir, "saga.toml", "[workflow]\nbreakdown_chunk_size = 3\n")
}

#[test]
fn test_plan_prints_ranges() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);

    let output = saga(&config, &["plan", "12", "--chunk-size", "5"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Chunk 1: chapters 1-5"));
    assert!(text.contains("Chunk 2: chapters 6-10"));
    assert!(text.contains("Chunk 3: chapters 11-12"));
}

#[test]
fn test_plan_uses_configured_chunk_size() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);

    let output = saga(&config, &["plan", "7", "--instructions"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Chunk 3: chapters 7-7"));
    assert!(text.contains("chapters 4 to 6"));
}

#[test]
fn test_validate_passes_with_aliases() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let file = write(
        &dir,
        "analysis.txt",
        "【Story So Far】\n...\n【Cast】\n...\n【Setting】\n...\n【Style】\n...\n【Open Threads】\n...",
    );

    let output = saga(&config, &["validate", "analysisRaw", file.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("All 5 required sections present"));
}

#[test]
fn test_validate_fails_when_sections_missing() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let file = write(&dir, "analysis.txt", "【Plot Summary】\nOnly this.");

    let output = saga(&config, &["validate", "analysisRaw", file.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let text = stdout(&output);
    assert!(text.contains("MISSING  【Characters】"));
    assert!(text.contains("4 of 5 required sections missing"));
}

#[test]
fn test_validate_json_report() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let file = write(&dir, "meta.txt", "【Breakdown Overview】\nArc.\n");

    let output = saga(
        &config,
        &["validate", "breakdownMeta", file.to_str().unwrap(), "--format", "json"],
    );
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["ok"], false);
    assert_eq!(report["missing"], serde_json::json!(["Writing Rules"]));
}

#[test]
fn test_validate_exempt_phase_passes() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let file = write(&dir, "chapter.txt", "Plain prose.");

    let output = saga(&config, &["validate", "chapterGeneration", file.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("no section contract"));
}

#[test]
fn test_analysis_prints_json() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let file = write(
        &dir,
        "analysis.txt",
        "<analysis_detail>\nLong notes\n</analysis_detail>\n<executive_summary>Short</executive_summary>",
    );

    let output = saga(&config, &["analysis", file.to_str().unwrap()]);
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["detail"], "Long notes");
    assert_eq!(parsed["executive_summary"], "Short");
    assert_eq!(parsed["tagged"], true);
}

#[test]
fn test_compose_from_meta_and_chunks() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let meta = write(
        &dir,
        "meta.txt",
        "【Breakdown Overview】\nTwo acts.\n【Writing Rules】\nPresent tense.",
    );
    let first = write(&dir, "chunk1.txt", "【Chapter Table】\n| 1 | Arrival |");
    let second = write(&dir, "chunk2.txt", "| 2 | The Ferry |");

    let output = saga(
        &config,
        &[
            "compose",
            "--meta",
            meta.to_str().unwrap(),
            "--table",
            first.to_str().unwrap(),
            "--table",
            second.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim_end(),
        "【Breakdown Overview】\nTwo acts.\n\n【Chapter Table】\n| 1 | Arrival |\n| 2 | The Ferry |\n\n【Writing Rules】\nPresent tense."
    );
}

#[test]
fn test_compose_without_parts_uses_placeholders() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);

    let output = saga(&config, &["compose"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).matches("(not provided)").count(), 3);
}

#[test]
fn test_resume_prompt_strips_directive() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let task = write(&dir, "task.txt", "Write chapter 4.\n");
    let stored = write(&dir, "output.txt", "The rain had not stopped.\n[[RESUME_GENERATION]]");

    let output = saga(
        &config,
        &["resume-prompt", task.to_str().unwrap(), stored.to_str().unwrap()],
    );
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("===== ORIGINAL TASK =====\nWrite chapter 4.\n"));
    assert!(text.contains("The rain had not stopped.\n===== END ALREADY OUTPUT ====="));
    assert!(!text.contains("[[RESUME_GENERATION]]"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = default_config(&dir);
    let absent = dir.path().join("absent.txt");

    let output = saga(&config, &["analysis", absent.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("NotFound"));
}
