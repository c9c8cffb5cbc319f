//! Saga CLI binary.
//!
//! This binary provides command-line access to the workflow helpers:
//! - Plan breakdown chunks and print their steering instructions
//! - Validate generated text against a phase's section contract
//! - Parse analysis output and compose breakdown documents
//! - Build continuation prompts for truncated output

use clap::Parser;
use saga::SagaConfig;
use saga::observability::{
    ObservabilityConfig, init_observability_with_config, shutdown_observability,
};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, compose_breakdown, parse_analysis, plan_breakdown, resume_prompt,
        validate_sections,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose { "debug" } else { "warn" };
    init_observability_with_config(
        ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    let config = match &cli.config {
        Some(path) => SagaConfig::from_file(path)?,
        None => SagaConfig::load()?,
    }
    .into_workflow();
    tracing::debug!(?config, "Configuration loaded");

    // Execute the requested command
    match cli.command {
        Commands::Plan {
            chapters,
            chunk_size,
            instructions,
        } => {
            let chunk_size = chunk_size.unwrap_or(*config.breakdown_chunk_size());
            plan_breakdown(chapters, chunk_size, instructions);
        }

        Commands::Validate {
            phase,
            file,
            format,
        } => {
            let passed = validate_sections(&config.catalog(), &phase, &file, format)?;
            if !passed {
                shutdown_observability();
                std::process::exit(1);
            }
        }

        Commands::Analysis { file } => {
            parse_analysis(&file)?;
        }

        Commands::Compose {
            meta,
            overview,
            table,
            rules,
        } => {
            compose_breakdown(meta.as_deref(), overview.as_deref(), &table, rules.as_deref())?;
        }

        Commands::ResumePrompt {
            task_file,
            output_file,
        } => {
            resume_prompt(&task_file, &output_file)?;
        }
    }

    shutdown_observability();
    Ok(())
}
