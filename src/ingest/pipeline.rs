use crate::error::MeetingError;
use crate::services::Transcriber;
use crate::store::{
    ChunkRecord, ChunkStore, EventStore, MeetingStatus, SessionStore, SystemEvent,
};
use std::sync::Arc;
use tracing::{info, warn};

/// One chunk upload as received from the transport layer.
#[derive(Debug, Clone)]
pub struct ChunkUpload {
    pub meeting_id: String,
    /// Caller-assigned sequence number. Not necessarily contiguous and not
    /// necessarily arriving in order.
    pub chunk_number: u64,
    /// Millisecond offset from meeting start, caller-supplied.
    pub chunk_timestamp: u64,
    pub audio: Vec<u8>,
    pub sample_rate: u32,
}

/// What the caller gets back for a successful upload.
#[derive(Debug, Clone)]
pub struct IngestReceipt {
    pub chunk_number: u64,
    /// Empty when transcription failed or recognized nothing; the audio is
    /// stored regardless.
    pub transcript: String,
    pub detected_language: String,
}

/// Persists chunks, drives them through transcription, and merges segments
/// back into the chunk store.
pub struct IngestPipeline {
    sessions: Arc<dyn SessionStore>,
    chunks: Arc<dyn ChunkStore>,
    transcriber: Arc<dyn Transcriber>,
    events: Arc<dyn EventStore>,
}

impl IngestPipeline {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        chunks: Arc<dyn ChunkStore>,
        transcriber: Arc<dyn Transcriber>,
        events: Arc<dyn EventStore>,
    ) -> Self {
        Self {
            sessions,
            chunks,
            transcriber,
            events,
        }
    }

    pub async fn ingest(&self, upload: ChunkUpload) -> Result<IngestReceipt, MeetingError> {
        let meeting_id = upload.meeting_id.clone();

        info!(
            "Receiving chunk {} for meeting {} ({} bytes)",
            upload.chunk_number,
            meeting_id,
            upload.audio.len()
        );

        // Uploads for meetings that were never started are a caller error,
        // and completed meetings no longer accept audio.
        let meeting = self
            .sessions
            .get(&meeting_id)
            .await
            .map_err(|e| MeetingError::store("get meeting", &meeting_id, e))?
            .ok_or_else(|| MeetingError::NotFound(meeting_id.clone()))?;

        if meeting.status != MeetingStatus::Recording {
            return Err(MeetingError::SessionClosed(meeting_id));
        }

        // Persist the raw audio before touching the transcription service.
        // A re-upload of the same chunk number replaces the whole row,
        // clearing any previous segment.
        let mut record = ChunkRecord {
            meeting_id: meeting_id.clone(),
            chunk_number: upload.chunk_number,
            chunk_timestamp: upload.chunk_timestamp,
            audio: upload.audio,
            sample_rate: upload.sample_rate,
            transcript_segment: None,
        };

        self.chunks
            .upsert(record.clone())
            .await
            .map_err(|e| MeetingError::store("store chunk", &meeting_id, e))?;

        let hint = (meeting.language != "auto").then_some(meeting.language.as_str());

        let (transcript, detected_language) = match self
            .transcriber
            .transcribe(&record.audio, record.sample_rate, hint)
            .await
        {
            Ok(result) => (result.text, result.language),
            Err(err) => {
                warn!(
                    "Transcription failed for chunk {} of meeting {}: {}",
                    record.chunk_number, meeting_id, err
                );
                let _ = self
                    .events
                    .append(SystemEvent::error(
                        format!(
                            "Failed to transcribe chunk {}: {err}",
                            record.chunk_number
                        ),
                        Some(&meeting_id),
                    ))
                    .await;
                (String::new(), "unknown".to_string())
            }
        };

        // Merge the segment with a second whole-row upsert. If a re-upload
        // of the same chunk number landed in between, this write wins and
        // carries our audio with it, so the row stays internally consistent.
        if !transcript.is_empty() {
            record.transcript_segment = Some(transcript.clone());
            self.chunks
                .upsert(record)
                .await
                .map_err(|e| MeetingError::store("store transcript segment", &meeting_id, e))?;

            info!(
                "Chunk {} of meeting {} transcribed ({} chars)",
                upload.chunk_number,
                meeting_id,
                transcript.len()
            );
        }

        Ok(IngestReceipt {
            chunk_number: upload.chunk_number,
            transcript,
            detected_language,
        })
    }
}
