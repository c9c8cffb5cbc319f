//! Saga - generation workflow for long-form fiction continuation
//!
//! Saga keeps long, multi-phase model generations on the rails. It checks
//! that structured phases produce every required `【Heading】`, retries once
//! with feedback when they do not, marks and continues output cut short by a
//! length limit, splits chapter breakdowns into bounded chunks, and throttles
//! streamed text for display.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use saga::{PhaseRunner, PromptPhaseKey, SagaConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SagaConfig::load()?.into_workflow();
//!     let runner = PhaseRunner::new(my_driver(), config);
//!
//!     let output = runner
//!         .run(&PromptPhaseKey::ANALYSIS_RAW, "Analyze the manuscript.", |text| {
//!             eprint!("\r{} chars", text.chars().count());
//!         })
//!         .await?;
//!     println!("{}", output.content);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - Export tracing spans through OpenTelemetry (stdout exporter)
//!
//! # Architecture
//!
//! - `saga_error` - Error types
//! - `saga_core` - Headings, section requirements, phase keys, attempts, ranges
//! - `saga_interface` - `TextStreaming` trait and stream chunk types
//! - `saga_workflow` - Validation, retry, resume, breakdown, analysis, throttling
//!
//! This crate (`saga`) re-exports everything for convenience.

pub use saga_core::*;
pub use saga_error::*;
pub use saga_interface::*;
pub use saga_workflow::*;

pub mod observability;
