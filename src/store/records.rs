use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a meeting.
///
/// `Failed` is reserved for irrecoverable finalization errors; the success
/// path only ever moves `Recording` -> `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Recording,
    Completed,
    Failed,
}

/// One meeting as held by the session store.
///
/// `full_transcript`, `summary`, and `agenda` stay empty until the meeting
/// completes; they are committed together in a single store operation. The
/// chunk count is deliberately not a field here — views derive it from the
/// chunk store so it can never drift.
#[derive(Debug, Clone)]
pub struct MeetingRecord {
    pub meeting_id: String,
    pub title: Option<String>,
    pub status: MeetingStatus,
    pub language: String,
    pub full_transcript: Option<String>,
    pub summary: Option<String>,
    pub agenda: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl MeetingRecord {
    pub fn new(meeting_id: String, title: Option<String>, language: String) -> Self {
        Self {
            meeting_id,
            title,
            status: MeetingStatus::Recording,
            language,
            full_transcript: None,
            summary: None,
            agenda: None,
            start_time: Utc::now(),
            end_time: None,
        }
    }
}

/// The fields committed atomically when a meeting completes.
#[derive(Debug, Clone)]
pub struct CompletedMeeting {
    pub full_transcript: String,
    pub summary: String,
    pub agenda: String,
    pub end_time: DateTime<Utc>,
}

/// One uploaded audio chunk and, once transcription has run, its segment.
///
/// Identity is (meeting_id, chunk_number); an upsert replaces the whole row,
/// which is what makes client retries after a dropped response safe.
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub meeting_id: String,
    pub chunk_number: u64,
    /// Caller-supplied offset in milliseconds from meeting start.
    pub chunk_timestamp: u64,
    pub audio: Vec<u8>,
    pub sample_rate: u32,
    pub transcript_segment: Option<String>,
}

/// A stored question/answer exchange. Immutable once appended.
#[derive(Debug, Clone, Serialize)]
pub struct QaInteraction {
    pub id: u64,
    pub meeting_id: String,
    pub question: String,
    pub answer: String,
    pub model_used: String,
    /// Seconds spent waiting on the answering service.
    pub response_time: f64,
    pub asked_at: DateTime<Utc>,
}

/// A Q&A exchange before the store has assigned it an id.
#[derive(Debug, Clone)]
pub struct NewQaInteraction {
    pub meeting_id: String,
    pub question: String,
    pub answer: String,
    pub model_used: String,
    pub response_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Info,
    Warning,
    Error,
}

/// Append-only audit entry. Written by the pipeline, never read back by it.
#[derive(Debug, Clone)]
pub struct SystemEvent {
    pub level: EventLevel,
    pub message: String,
    pub meeting_id: Option<String>,
    pub stack_trace: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl SystemEvent {
    pub fn info(message: impl Into<String>, meeting_id: Option<&str>) -> Self {
        Self::new(EventLevel::Info, message, meeting_id)
    }

    pub fn error(message: impl Into<String>, meeting_id: Option<&str>) -> Self {
        Self::new(EventLevel::Error, message, meeting_id)
    }

    fn new(level: EventLevel, message: impl Into<String>, meeting_id: Option<&str>) -> Self {
        Self {
            level,
            message: message.into(),
            meeting_id: meeting_id.map(str::to_owned),
            stack_trace: None,
            recorded_at: Utc::now(),
        }
    }
}
