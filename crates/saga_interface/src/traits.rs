//! Trait definitions for the model-calling collaborator.

use crate::StreamChunk;
use async_trait::async_trait;
use futures_util::stream::Stream;
use saga_error::SagaResult;
use std::pin::Pin;

/// Boxed stream of text chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = SagaResult<StreamChunk>> + Send>>;

/// A model provider that streams text for a prompt.
///
/// Implementations own transport, authentication and network retries.
/// The workflow core only consumes the resulting chunks.
#[async_trait]
pub trait TextStreaming: Send + Sync {
    /// Start generating a response to `prompt`.
    async fn generate_stream(&self, prompt: &str) -> SagaResult<ChunkStream>;

    /// Provider name (e.g., "openai", "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}
