//! Core data types for the saga generation workflow.
//!
//! These types describe the structural contract of generated text (headings
//! and section requirements), the phases of the generation pipeline, and the
//! chapter windows used when a breakdown is generated in chunks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attempt;
mod heading;
mod phase;
mod range;
mod requirement;

pub use attempt::GenerationAttempt;
pub use heading::{HEADING_CLOSE, HEADING_OPEN, Heading, normalize_label};
pub use phase::PromptPhaseKey;
pub use range::BreakdownRange;
pub use requirement::{SectionRequirement, SectionRequirementBuilder};
