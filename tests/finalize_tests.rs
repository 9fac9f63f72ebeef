// Integration tests for meeting finalization and Q&A: transcript stitching,
// degraded summary/agenda generation, and the finalized-transcript gate.

mod support;

use anyhow::Result;
use meetingd::analysis::{AGENDA_PROMPT, SUMMARY_PROMPT};
use meetingd::{MeetingError, MeetingStatus};
use std::sync::Arc;
use support::{EchoTranscriber, StubAnswerer};

#[tokio::test]
async fn test_stitch_skips_untranscribed_chunks_without_placeholder() -> Result<()> {
    let h = support::echo_harness();
    h.registry.start("m", None, None).await?;

    h.ingest.ingest(support::upload("m", 0, "hello")).await?;
    // Chunk 1 recognizes nothing, so no segment is ever written.
    h.ingest.ingest(support::upload("m", 1, "")).await?;
    h.ingest.ingest(support::upload("m", 2, "world")).await?;

    let wrap_up = h.orchestrator.end_meeting("m").await?;
    assert_eq!(wrap_up.total_chunks, 3);
    assert_eq!(wrap_up.transcript_length, "hello world".len());

    let meeting = h.registry.get("m").await?;
    assert_eq!(meeting.status, MeetingStatus::Completed);
    assert_eq!(meeting.full_transcript.as_deref(), Some("hello world"));

    Ok(())
}

#[tokio::test]
async fn test_stitch_follows_chunk_number_not_arrival_order() -> Result<()> {
    let h = support::echo_harness();
    h.registry.start("m", None, None).await?;

    h.ingest.ingest(support::upload("m", 2, "last")).await?;
    h.ingest.ingest(support::upload("m", 0, "first")).await?;
    h.ingest.ingest(support::upload("m", 1, "middle")).await?;

    h.orchestrator.end_meeting("m").await?;

    let meeting = h.registry.get("m").await?;
    assert_eq!(meeting.full_transcript.as_deref(), Some("first middle last"));

    Ok(())
}

#[tokio::test]
async fn test_end_meeting_with_no_chunks_leaves_meeting_untouched() -> Result<()> {
    let h = support::echo_harness();
    h.registry.start("m", None, None).await?;

    let err = h.orchestrator.end_meeting("m").await.unwrap_err();
    assert!(matches!(err, MeetingError::NoChunks(_)));

    let meeting = h.registry.get("m").await?;
    assert_eq!(meeting.status, MeetingStatus::Recording);
    assert!(meeting.full_transcript.is_none());

    Ok(())
}

#[tokio::test]
async fn test_end_meeting_unknown_meeting_fails() -> Result<()> {
    let h = support::echo_harness();

    let err = h.orchestrator.end_meeting("ghost").await.unwrap_err();
    assert!(matches!(err, MeetingError::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_summary_failure_does_not_abort_agenda_or_completion() -> Result<()> {
    let h = support::harness(
        Arc::new(EchoTranscriber),
        Arc::new(StubAnswerer::failing_on("summary")),
    );
    h.registry.start("m", None, None).await?;
    h.ingest.ingest(support::upload("m", 0, "we decided things")).await?;

    let wrap_up = h.orchestrator.end_meeting("m").await?;

    assert!(
        wrap_up.summary.starts_with("Error generating answer:"),
        "failed summary must be stored as error text, got: {}",
        wrap_up.summary
    );
    assert_eq!(wrap_up.agenda, format!("reply to: {AGENDA_PROMPT}"));

    let meeting = h.registry.get("m").await?;
    assert_eq!(meeting.status, MeetingStatus::Completed);
    assert_eq!(meeting.summary.as_deref(), Some(wrap_up.summary.as_str()));
    assert_eq!(meeting.agenda.as_deref(), Some(wrap_up.agenda.as_str()));

    Ok(())
}

#[tokio::test]
async fn test_successful_end_meeting_stores_both_analyses() -> Result<()> {
    let h = support::echo_harness();
    h.registry.start("m", None, None).await?;
    h.ingest.ingest(support::upload("m", 0, "quarterly numbers")).await?;

    let wrap_up = h.orchestrator.end_meeting("m").await?;
    assert_eq!(wrap_up.summary, format!("reply to: {SUMMARY_PROMPT}"));
    assert_eq!(wrap_up.agenda, format!("reply to: {AGENDA_PROMPT}"));

    Ok(())
}

#[tokio::test]
async fn test_end_meeting_twice_overwrites() -> Result<()> {
    let h = support::echo_harness();
    h.registry.start("m", None, None).await?;
    h.ingest.ingest(support::upload("m", 0, "take one")).await?;
    h.orchestrator.end_meeting("m").await?;

    // A second finalization re-reads the chunks and overwrites the outcome.
    h.ingest
        .ingest(support::upload("m", 1, "late addendum"))
        .await
        .unwrap_err(); // closed to uploads
    let second = h.orchestrator.end_meeting("m").await?;
    assert_eq!(second.total_chunks, 1);

    let meeting = h.registry.get("m").await?;
    assert_eq!(meeting.full_transcript.as_deref(), Some("take one"));

    Ok(())
}

#[tokio::test]
async fn test_question_before_finalization_is_rejected() -> Result<()> {
    let h = support::echo_harness();
    h.registry.start("m", None, None).await?;
    h.ingest.ingest(support::upload("m", 0, "in progress")).await?;

    let err = h
        .orchestrator
        .ask_question("m", "what was decided?")
        .await
        .unwrap_err();
    assert!(matches!(err, MeetingError::TranscriptUnavailable(_)));

    Ok(())
}

#[tokio::test]
async fn test_question_is_answered_and_recorded() -> Result<()> {
    let h = support::echo_harness();
    h.registry.start("m", None, None).await?;
    h.ingest.ingest(support::upload("m", 0, "ship on friday")).await?;
    h.orchestrator.end_meeting("m").await?;

    let reply = h.orchestrator.ask_question("m", "when do we ship?").await?;
    assert_eq!(reply.answer, "reply to: when do we ship?");
    assert_eq!(reply.model_used, "stub-model");

    let history = h.store.interactions().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, 1);
    assert_eq!(history[0].meeting_id, "m");
    assert_eq!(history[0].question, "when do we ship?");
    assert_eq!(history[0].answer, "reply to: when do we ship?");

    Ok(())
}

#[tokio::test]
async fn test_failed_answer_is_still_recorded() -> Result<()> {
    // Fails every prompt, so finalization stores error text and the
    // transcript, then the question itself also fails at the service.
    let h = support::harness(
        Arc::new(EchoTranscriber),
        Arc::new(StubAnswerer::failing_on("")),
    );
    h.registry.start("m", None, None).await?;
    h.ingest.ingest(support::upload("m", 0, "some content")).await?;
    h.orchestrator.end_meeting("m").await?;

    let reply = h.orchestrator.ask_question("m", "anything?").await?;
    assert!(reply.answer.starts_with("Error generating answer:"));
    assert_eq!(reply.model_used, "stub-model");

    let history = h.store.interactions().await;
    assert_eq!(history.len(), 1);
    assert!(history[0].answer.starts_with("Error generating answer:"));

    Ok(())
}

#[tokio::test]
async fn test_action_items_require_finalized_transcript() -> Result<()> {
    let h = support::echo_harness();
    h.registry.start("m", None, None).await?;
    h.ingest.ingest(support::upload("m", 0, "alice owns rollout")).await?;

    let err = h.orchestrator.action_items("m").await.unwrap_err();
    assert!(matches!(err, MeetingError::TranscriptUnavailable(_)));

    h.orchestrator.end_meeting("m").await?;

    let reply = h.orchestrator.action_items("m").await?;
    assert!(reply.answer.starts_with("reply to: Extract all action items"));

    // Canned extractions are not part of the Q&A history.
    assert!(h.store.interactions().await.is_empty());

    Ok(())
}
