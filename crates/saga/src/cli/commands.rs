//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Saga - section-checked, resumable generation workflow tools
#[derive(Parser, Debug)]
#[command(name = "saga")]
#[command(about = "Section contracts, breakdown planning and resume prompts for long-form generation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file to use instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the chapter ranges a breakdown is generated in
    Plan {
        /// Total number of chapters
        chapters: u32,

        /// Chapters per chunk (defaults to the configured size)
        #[arg(long)]
        chunk_size: Option<u32>,

        /// Also print the steering instruction for each chunk
        #[arg(long)]
        instructions: bool,
    },

    /// Check a file against the section contract of a phase
    Validate {
        /// Phase key, e.g. analysisRaw
        phase: String,

        /// File holding the generated text
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Split a tagged analysis response into detail and summary (JSON)
    Analysis {
        /// File holding the analysis response
        file: PathBuf,
    },

    /// Assemble a breakdown document from its parts
    Compose {
        /// Breakdown meta response to take the overview and rules from
        #[arg(long)]
        meta: Option<PathBuf>,

        /// Overview body (overrides --meta)
        #[arg(long)]
        overview: Option<PathBuf>,

        /// Chapter table chunk; repeat in chapter order
        #[arg(long)]
        table: Vec<PathBuf>,

        /// Writing rules body (overrides --meta)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Print the continuation prompt for a truncated output
    ResumePrompt {
        /// File holding the original task prompt
        task_file: PathBuf,

        /// File holding the stored (possibly directive-marked) output
        output_file: PathBuf,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
