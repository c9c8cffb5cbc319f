//! Generation workflow core for long-form fiction continuation.
//!
//! This crate holds the pieces that sit between prompt assembly and a
//! streaming text backend:
//!
//! - Section contracts: detect `【Heading】` sections and report what is missing
//! - Section retry: one corrective attempt that names the missing headings
//! - Resume directives: mark truncated output and build continuation prompts
//! - Breakdown planning: chunk a chapter table and assemble the final document
//! - Analysis parsing: split tagged analysis output into detail and summary
//! - Update throttling: coalesce streamed text for display
//!
//! [`PhaseRunner`] ties these together over any [`saga_interface::TextStreaming`]
//! backend.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod breakdown;
mod catalog;
mod config;
mod resume;
mod retry;
mod runner;
mod sections;
mod stream;
mod throttle;

pub use analysis::{AnalysisOutput, parse_analysis_output};
pub use breakdown::{
    BREAKDOWN_OVERVIEW_HEADING, BREAKDOWN_OVERVIEW_LABEL, BREAKDOWN_PLACEHOLDER,
    BREAKDOWN_RULES_HEADING, BREAKDOWN_RULES_LABEL, BREAKDOWN_TABLE_HEADING,
    BREAKDOWN_TABLE_LABEL, BreakdownMeta, BreakdownParts, DEFAULT_BREAKDOWN_CHUNK_SIZE,
    breakdown_chunk_instruction, build_breakdown_ranges, compose_breakdown_content,
    extract_breakdown_meta_sections, join_breakdown_chunks, normalize_breakdown_chunk_content,
};
pub use catalog::RequirementCatalog;
pub use config::{SagaConfig, WorkflowConfig};
pub use resume::{
    RESUME_DIRECTIVE, append_resume_directive, build_resume_prompt, has_resume_directive,
    strip_resume_directive,
};
pub use retry::{
    DEFAULT_MAX_SECTION_ATTEMPTS, RetryOutcome, SectionRetry, build_retry_prompt,
    generate_with_section_retry,
};
pub use runner::{PhaseOutput, PhaseRunner};
pub use sections::{SectionValidation, extract_headings, validate_required_sections};
pub use stream::{StreamedText, collect_stream, collect_stream_continuing};
pub use throttle::{Scheduler, ThrottledUpdater, TokioScheduler, create_throttled_updater};
