//! Accumulation of streamed model output.

use crate::{ThrottledUpdater, append_resume_directive};
use futures_util::{Stream, StreamExt};
use saga_error::{SagaResult, WorkflowError, WorkflowErrorKind};
use saga_interface::{FinishReason, StreamChunk};
use tracing::{debug, warn};

/// Text gathered from one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamedText {
    /// Concatenated deltas.
    pub text: String,
    /// Finish reason reported by the final chunk, if any.
    pub finish_reason: Option<FinishReason>,
    /// True when generation stopped at a length limit.
    pub truncated: bool,
}

impl StreamedText {
    /// Text ready for storage: truncated output carries the resume directive.
    pub fn into_stored(self) -> String {
        if self.truncated {
            append_resume_directive(&self.text)
        } else {
            self.text
        }
    }
}

/// Drain `stream`, mirroring the running text into `updater`.
///
/// The updater is flushed before returning, including when the stream fails.
///
/// # Errors
///
/// Propagates the first error yielded by the stream, and returns
/// [`WorkflowErrorKind::EmptyStream`] when the stream yields nothing at all.
pub async fn collect_stream<S>(
    stream: S,
    updater: Option<&ThrottledUpdater<String>>,
) -> SagaResult<StreamedText>
where
    S: Stream<Item = SagaResult<StreamChunk>> + Unpin,
{
    collect_stream_continuing("", stream, updater).await
}

/// Like [`collect_stream`], for a stream that continues `existing` output.
///
/// The updater sees `existing` followed by the new text; the returned
/// [`StreamedText`] holds only the new text. While an update is already
/// queued the running text is not rebuilt; the latest text is pushed once the
/// queue drains or the stream ends.
pub async fn collect_stream_continuing<S>(
    existing: &str,
    mut stream: S,
    updater: Option<&ThrottledUpdater<String>>,
) -> SagaResult<StreamedText>
where
    S: Stream<Item = SagaResult<StreamChunk>> + Unpin,
{
    let mut text = String::new();
    let mut finish_reason = None;
    let mut chunk_count = 0usize;
    // Text has grown past the last value handed to the updater.
    let mut dirty = false;

    while let Some(item) = stream.next().await {
        let chunk = match item {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!(chunk_count, error = %e, "Stream failed mid-generation");
                if let Some(updater) = updater {
                    finish_updates(updater, existing, &text, dirty);
                }
                return Err(e);
            }
        };
        chunk_count += 1;

        if !chunk.delta.is_empty() {
            text.push_str(&chunk.delta);
            if let Some(updater) = updater {
                if updater.has_pending() {
                    dirty = true;
                } else {
                    updater.push(format!("{}{}", existing, text));
                    dirty = false;
                }
            }
        }

        if chunk.finish_reason.is_some() {
            finish_reason = chunk.finish_reason;
        }
        if chunk.is_final {
            break;
        }
    }

    if let Some(updater) = updater {
        finish_updates(updater, existing, &text, dirty);
    }

    if chunk_count == 0 {
        return Err(WorkflowError::new(WorkflowErrorKind::EmptyStream).into());
    }

    let truncated = finish_reason.is_some_and(|reason| reason.is_truncation());
    debug!(
        chunk_count,
        chars = text.chars().count(),
        ?finish_reason,
        truncated,
        "Stream collected"
    );

    Ok(StreamedText {
        text,
        finish_reason,
        truncated,
    })
}

fn finish_updates(updater: &ThrottledUpdater<String>, existing: &str, text: &str, dirty: bool) {
    if dirty {
        updater.push(format!("{}{}", existing, text));
    }
    updater.flush();
}
