//! Tests for stream accumulation.

use futures_util::stream;
use saga_error::{BackendError, SagaError, SagaResult, WorkflowErrorKind};
use saga_interface::{FinishReason, StreamChunk};
use saga_workflow::{
    RESUME_DIRECTIVE, ThrottledUpdater, collect_stream, collect_stream_continuing,
    create_throttled_updater,
};
use std::sync::{Arc, Mutex};

fn chunks(
    items: Vec<SagaResult<StreamChunk>>,
) -> impl futures_util::Stream<Item = SagaResult<StreamChunk>> + Unpin {
    stream::iter(items)
}

fn recording_updater(interval_ms: u64) -> (ThrottledUpdater<String>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let updater = create_throttled_updater(interval_ms, move |text| {
        sink.lock().unwrap().push(text);
    });
    (updater, seen)
}

#[tokio::test]
async fn test_collects_deltas_until_stop() {
    let streamed = collect_stream(
        chunks(vec![
            Ok(StreamChunk::delta("Once ")),
            Ok(StreamChunk::delta("upon a time")),
            Ok(StreamChunk::finished(FinishReason::Stop)),
        ]),
        None,
    )
    .await
    .unwrap();

    assert_eq!(streamed.text, "Once upon a time");
    assert_eq!(streamed.finish_reason, Some(FinishReason::Stop));
    assert!(!streamed.truncated);
    assert_eq!(streamed.into_stored(), "Once upon a time");
}

#[tokio::test]
async fn test_length_cutoff_marks_truncation() {
    let streamed = collect_stream(
        chunks(vec![
            Ok(StreamChunk::delta("The storm broke")),
            Ok(StreamChunk::finished(FinishReason::Length)),
        ]),
        None,
    )
    .await
    .unwrap();

    assert!(streamed.truncated);
    let stored = streamed.into_stored();
    assert!(stored.starts_with("The storm broke"));
    assert!(stored.ends_with(RESUME_DIRECTIVE));
}

#[tokio::test]
async fn test_content_filter_is_not_truncation() {
    let streamed = collect_stream(
        chunks(vec![
            Ok(StreamChunk::delta("partial")),
            Ok(StreamChunk::finished(FinishReason::ContentFilter)),
        ]),
        None,
    )
    .await
    .unwrap();

    assert!(!streamed.truncated);
    assert_eq!(streamed.finish_reason, Some(FinishReason::ContentFilter));
}

#[tokio::test]
async fn test_chunks_after_final_are_ignored() {
    let streamed = collect_stream(
        chunks(vec![
            Ok(StreamChunk::delta("kept")),
            Ok(StreamChunk::finished(FinishReason::Stop)),
            Ok(StreamChunk::delta(" dropped")),
        ]),
        None,
    )
    .await
    .unwrap();

    assert_eq!(streamed.text, "kept");
}

#[tokio::test]
async fn test_stream_without_final_chunk() {
    let streamed = collect_stream(chunks(vec![Ok(StreamChunk::delta("open ended"))]), None)
        .await
        .unwrap();

    assert_eq!(streamed.text, "open ended");
    assert_eq!(streamed.finish_reason, None);
    assert!(!streamed.truncated);
}

#[tokio::test]
async fn test_empty_stream_is_an_error() {
    let err = collect_stream(chunks(Vec::new()), None).await.unwrap_err();

    let workflow = err.as_workflow().expect("workflow error");
    assert!(matches!(workflow.kind(), WorkflowErrorKind::EmptyStream));
}

#[tokio::test(start_paused = true)]
async fn test_mid_stream_error_flushes_updates() {
    let (updater, seen) = recording_updater(100);

    let err = collect_stream(
        chunks(vec![
            Ok(StreamChunk::delta("a")),
            Ok(StreamChunk::delta("b")),
            Err(SagaError::from(BackendError::new("connection reset"))),
        ]),
        Some(&updater),
    )
    .await
    .unwrap_err();

    assert!(matches!(err.kind(), saga_error::SagaErrorKind::Backend(_)));
    assert_eq!(*seen.lock().unwrap(), ["a", "ab"]);
    assert!(!updater.has_pending());
}

#[tokio::test(start_paused = true)]
async fn test_continuation_updates_include_existing_text() {
    let (updater, seen) = recording_updater(100);

    let streamed = collect_stream_continuing(
        "Chapter one. ",
        chunks(vec![
            Ok(StreamChunk::delta("Chapter ")),
            Ok(StreamChunk::delta("two.")),
            Ok(StreamChunk::finished(FinishReason::Stop)),
        ]),
        Some(&updater),
    )
    .await
    .unwrap();

    assert_eq!(streamed.text, "Chapter two.");
    let seen = seen.lock().unwrap();
    assert_eq!(seen.first().map(String::as_str), Some("Chapter one. Chapter "));
    assert_eq!(seen.last().map(String::as_str), Some("Chapter one. Chapter two."));
}

#[tokio::test(start_paused = true)]
async fn test_deltas_behind_a_queued_update_are_coalesced() {
    let (updater, seen) = recording_updater(100);

    let streamed = collect_stream(
        chunks(vec![
            Ok(StreamChunk::delta("a")),
            Ok(StreamChunk::delta("b")),
            Ok(StreamChunk::delta("c")),
            Ok(StreamChunk::delta("d")),
            Ok(StreamChunk::finished(FinishReason::Stop)),
        ]),
        Some(&updater),
    )
    .await
    .unwrap();

    assert_eq!(streamed.text, "abcd");
    assert_eq!(*seen.lock().unwrap(), ["a", "abcd"]);
    assert!(!updater.has_pending());
}

#[tokio::test(start_paused = true)]
async fn test_mid_stream_error_delivers_latest_text() {
    let (updater, seen) = recording_updater(100);

    collect_stream(
        chunks(vec![
            Ok(StreamChunk::delta("a")),
            Ok(StreamChunk::delta("b")),
            Ok(StreamChunk::delta("c")),
            Err(SagaError::from(BackendError::new("connection reset"))),
        ]),
        Some(&updater),
    )
    .await
    .unwrap_err();

    assert_eq!(*seen.lock().unwrap(), ["a", "abc"]);
}
