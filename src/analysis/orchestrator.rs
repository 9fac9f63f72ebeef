use crate::error::MeetingError;
use crate::services::Answerer;
use crate::session::SessionRegistry;
use crate::store::{ChunkStore, EventStore, NewQaInteraction, QaStore, SystemEvent};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub const SUMMARY_PROMPT: &str = "Please provide a comprehensive summary of this meeting \
including key discussion points, decisions made, and any action items.";

pub const AGENDA_PROMPT: &str =
    "What was the agenda of this meeting? List the main topics discussed.";

pub const ACTION_ITEMS_PROMPT: &str = "Extract all action items, tasks, and follow-ups \
mentioned in this meeting. Format as a list with responsible persons if mentioned.";

/// What `end_meeting` hands back to the caller.
#[derive(Debug, Clone)]
pub struct MeetingWrapUp {
    pub meeting_id: String,
    /// Length of the stitched transcript in characters.
    pub transcript_length: usize,
    pub total_chunks: usize,
    pub summary: String,
    pub agenda: String,
}

/// An answer from the shared consult primitive.
#[derive(Debug, Clone)]
pub struct QaReply {
    pub answer: String,
    pub model_used: String,
    /// Seconds spent waiting on the answering service.
    pub response_time: f64,
}

/// Stitches transcripts at meeting end and serves prompt-driven analysis
/// (summary, agenda, action items, ad-hoc questions) over them.
pub struct MeetingOrchestrator {
    registry: Arc<SessionRegistry>,
    chunks: Arc<dyn ChunkStore>,
    qa: Arc<dyn QaStore>,
    answerer: Arc<dyn Answerer>,
    events: Arc<dyn EventStore>,
}

impl MeetingOrchestrator {
    pub fn new(
        registry: Arc<SessionRegistry>,
        chunks: Arc<dyn ChunkStore>,
        qa: Arc<dyn QaStore>,
        answerer: Arc<dyn Answerer>,
        events: Arc<dyn EventStore>,
    ) -> Self {
        Self {
            registry,
            chunks,
            qa,
            answerer,
            events,
        }
    }

    /// Finalize a meeting: stitch the full transcript, generate summary and
    /// agenda, and commit everything atomically.
    ///
    /// The answering service failing for one of summary/agenda never aborts
    /// the other, and never aborts completion: the failed half is stored as
    /// error-annotated text. Only a missing meeting, an empty chunk set, or
    /// a store failure can make this return an error.
    pub async fn end_meeting(&self, meeting_id: &str) -> Result<MeetingWrapUp, MeetingError> {
        info!("Ending meeting: {}", meeting_id);

        // Existence check up front so a finalize of an unknown meeting does
        // not read chunks that a concurrent start could be writing.
        self.registry.get(meeting_id).await?;

        // Snapshot read. Chunks racing with finalization may or may not be
        // included.
        let chunks = self
            .chunks
            .list_by_meeting(meeting_id)
            .await
            .map_err(|e| MeetingError::store("list chunks", meeting_id, e))?;

        if chunks.is_empty() {
            return Err(MeetingError::NoChunks(meeting_id.to_string()));
        }

        // Chunks whose transcription never succeeded are skipped with no
        // placeholder, so a transcription gap is invisible in the stitched
        // text. Callers that need gap visibility must look at the per-chunk
        // segments instead.
        let transcript = chunks
            .iter()
            .filter_map(|chunk| chunk.transcript_segment.as_deref())
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let (summary, agenda) = futures::future::join(
            self.consult(meeting_id, &transcript, SUMMARY_PROMPT),
            self.consult(meeting_id, &transcript, AGENDA_PROMPT),
        )
        .await;

        self.registry
            .complete(
                meeting_id,
                transcript.clone(),
                summary.answer.clone(),
                agenda.answer.clone(),
            )
            .await?;

        info!(
            "Meeting {} completed: {} chunks, {} transcript chars",
            meeting_id,
            chunks.len(),
            transcript.chars().count()
        );

        Ok(MeetingWrapUp {
            meeting_id: meeting_id.to_string(),
            transcript_length: transcript.chars().count(),
            total_chunks: chunks.len(),
            summary: summary.answer,
            agenda: agenda.answer,
        })
    }

    /// Answer an ad-hoc question against a finalized transcript and persist
    /// the exchange — including exchanges where the answering service failed
    /// and the answer is error text.
    pub async fn ask_question(
        &self,
        meeting_id: &str,
        question: &str,
    ) -> Result<QaReply, MeetingError> {
        info!("Q&A request for meeting {}: {}", meeting_id, question);

        let meeting = self.registry.get(meeting_id).await?;
        let transcript = meeting
            .full_transcript
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MeetingError::TranscriptUnavailable(meeting_id.to_string()))?;

        let reply = self.consult(meeting_id, &transcript, question).await;

        self.qa
            .append(NewQaInteraction {
                meeting_id: meeting_id.to_string(),
                question: question.to_string(),
                answer: reply.answer.clone(),
                model_used: reply.model_used.clone(),
                response_time: reply.response_time,
            })
            .await
            .map_err(|e| MeetingError::store("record Q&A interaction", meeting_id, e))?;

        Ok(reply)
    }

    /// Extract action items from a finalized transcript. Same preconditions
    /// as `ask_question`, but canned extractions are not part of the Q&A
    /// history.
    pub async fn action_items(&self, meeting_id: &str) -> Result<QaReply, MeetingError> {
        let meeting = self.registry.get(meeting_id).await?;
        let transcript = meeting
            .full_transcript
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MeetingError::TranscriptUnavailable(meeting_id.to_string()))?;

        Ok(self.consult(meeting_id, &transcript, ACTION_ITEMS_PROMPT).await)
    }

    /// The one place the answering service is called. A failure becomes
    /// error-annotated answer text, so every caller shares the same degraded
    /// behavior and the same latency measurement.
    async fn consult(&self, meeting_id: &str, transcript: &str, prompt: &str) -> QaReply {
        let started = Instant::now();

        match self.answerer.ask(transcript, prompt).await {
            Ok(answer) => QaReply {
                answer: answer.text,
                model_used: answer.model,
                response_time: started.elapsed().as_secs_f64(),
            },
            Err(err) => {
                warn!("Answering service failed for meeting {}: {}", meeting_id, err);
                let _ = self
                    .events
                    .append(SystemEvent::error(
                        format!("Answering service failed: {err}"),
                        Some(meeting_id),
                    ))
                    .await;

                QaReply {
                    answer: format!("Error generating answer: {err}"),
                    model_used: self.answerer.model_id().to_string(),
                    response_time: started.elapsed().as_secs_f64(),
                }
            }
        }
    }
}
