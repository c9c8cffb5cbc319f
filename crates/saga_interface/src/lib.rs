//! Trait definitions for the saga generation workflow.
//!
//! The workflow core never talks to a model provider directly; it consumes
//! the [`TextStreaming`] trait implemented by an external collaborator.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ChunkStream, TextStreaming};
pub use types::{FinishReason, StreamChunk};
