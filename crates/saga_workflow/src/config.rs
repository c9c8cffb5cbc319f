//! Workflow configuration.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (include_str! from saga.toml)
//! - User overrides (~/.config/saga/saga.toml, then ./saga.toml)
//!
//! Nothing in the workflow reads the process environment; every knob arrives
//! through these types at construction time.

use crate::{
    DEFAULT_BREAKDOWN_CHUNK_SIZE, DEFAULT_MAX_SECTION_ATTEMPTS, RequirementCatalog,
};
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use saga_core::SectionRequirement;
use saga_error::{ConfigError, SagaError, SagaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Tunables of the generation workflow.
///
/// # Example
///
/// ```toml
/// [workflow]
/// max_section_attempts = 3
/// breakdown_chunk_size = 4
///
/// [[workflow.sections.analysisRaw]]
/// name = "Plot Summary"
/// aliases = ["Story So Far"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Getters)]
pub struct WorkflowConfig {
    /// Generation attempts per enforced phase
    #[serde(default = "default_max_section_attempts")]
    max_section_attempts: u32,

    /// Chapters per breakdown generation call
    #[serde(default = "default_breakdown_chunk_size")]
    breakdown_chunk_size: u32,

    /// Minimum milliseconds between streamed updates (0 disables coalescing)
    #[serde(default = "default_stream_update_interval_ms")]
    stream_update_interval_ms: u64,

    /// Resume-prompt continuations after a length cutoff
    #[serde(default = "default_max_continuations")]
    max_continuations: u32,

    /// Section contract overrides keyed by phase
    #[serde(default)]
    sections: HashMap<String, Vec<SectionRequirement>>,
}

fn default_max_section_attempts() -> u32 {
    DEFAULT_MAX_SECTION_ATTEMPTS
}

fn default_breakdown_chunk_size() -> u32 {
    DEFAULT_BREAKDOWN_CHUNK_SIZE
}

fn default_stream_update_interval_ms() -> u64 {
    100
}

fn default_max_continuations() -> u32 {
    2
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_section_attempts: default_max_section_attempts(),
            breakdown_chunk_size: default_breakdown_chunk_size(),
            stream_update_interval_ms: default_stream_update_interval_ms(),
            max_continuations: default_max_continuations(),
            sections: HashMap::new(),
        }
    }
}

impl WorkflowConfig {
    /// Sets the attempt budget per enforced phase.
    pub fn with_max_section_attempts(mut self, attempts: u32) -> Self {
        self.max_section_attempts = attempts;
        self
    }

    /// Sets the breakdown chunk size.
    pub fn with_breakdown_chunk_size(mut self, chunk_size: u32) -> Self {
        self.breakdown_chunk_size = chunk_size;
        self
    }

    /// Sets the streamed update interval in milliseconds.
    pub fn with_stream_update_interval_ms(mut self, interval_ms: u64) -> Self {
        self.stream_update_interval_ms = interval_ms;
        self
    }

    /// Sets the continuation budget.
    pub fn with_max_continuations(mut self, continuations: u32) -> Self {
        self.max_continuations = continuations;
        self
    }

    /// Adds or replaces the section contract of a phase.
    pub fn with_sections(
        mut self,
        phase: impl Into<String>,
        requirements: Vec<SectionRequirement>,
    ) -> Self {
        self.sections.insert(phase.into(), requirements);
        self
    }

    /// Streamed update interval as a duration.
    pub fn stream_update_interval(&self) -> Duration {
        Duration::from_millis(self.stream_update_interval_ms)
    }

    /// Built-in catalog with the configured overrides applied.
    pub fn catalog(&self) -> RequirementCatalog {
        RequirementCatalog::builtin().with_overrides(&self.sections)
    }
}

/// Top-level saga configuration file.
///
/// # Example
///
/// ```no_run
/// use saga_workflow::SagaConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SagaConfig::load()?;
/// println!("chunk size: {}", config.workflow().breakdown_chunk_size());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default, Getters)]
pub struct SagaConfig {
    /// Workflow tunables
    #[serde(default)]
    workflow: WorkflowConfig,
}

impl SagaConfig {
    /// Wrap a workflow configuration.
    pub fn new(workflow: WorkflowConfig) -> Self {
        Self { workflow }
    }

    /// Consume the file, keeping the workflow section.
    pub fn into_workflow(self) -> WorkflowConfig {
        self.workflow
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> SagaResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| SagaError::from(ConfigError::in_file(path.as_ref().display(), e)))?
            .try_deserialize()
            .map_err(|e| {
                SagaError::from(ConfigError::in_file(
                    path.as_ref().display(),
                    format!("invalid settings: {}", e),
                ))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    #[instrument]
    pub fn load() -> SagaResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../saga.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/saga/saga.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("saga").required(false));

        builder
            .build()
            .map_err(|e| {
                SagaError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SagaError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
