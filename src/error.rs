use crate::store::StoreError;
use thiserror::Error;

/// Errors surfaced by the meeting pipeline.
///
/// Transcription and answering failures never appear here: they are degraded
/// to empty segments or error-annotated answer text so a flaky external
/// service cannot fail an upload or a finalization. Store failures are fatal
/// to the current request and carry the operation and meeting id so the
/// caller can retry against the idempotent upserts.
#[derive(Debug, Error)]
pub enum MeetingError {
    #[error("meeting `{0}` already exists")]
    AlreadyExists(String),

    #[error("meeting `{0}` not found")]
    NotFound(String),

    #[error("meeting `{0}` has ended and no longer accepts audio")]
    SessionClosed(String),

    #[error("no audio chunks stored for meeting `{0}`")]
    NoChunks(String),

    #[error("transcript for meeting `{0}` is not available yet")]
    TranscriptUnavailable(String),

    #[error("store operation `{op}` failed for meeting `{meeting_id}`: {source}")]
    Store {
        op: &'static str,
        meeting_id: String,
        #[source]
        source: StoreError,
    },
}

impl MeetingError {
    /// Wrap a store failure with the operation and meeting it interrupted.
    pub fn store(op: &'static str, meeting_id: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            op,
            meeting_id: meeting_id.into(),
            source,
        }
    }
}
