use crate::error::MeetingError;
use crate::store::{
    ChunkStore, CompletedMeeting, EventStore, MeetingRecord, MeetingStatus, SessionStore,
    SystemEvent,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Full view of one meeting, chunk count included.
#[derive(Debug, Clone, Serialize)]
pub struct Meeting {
    pub meeting_id: String,
    pub title: Option<String>,
    pub status: MeetingStatus,
    pub language: String,
    pub full_transcript: Option<String>,
    pub summary: Option<String>,
    pub agenda: Option<String>,
    pub total_chunks: u64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Meeting {
    fn from_record(record: MeetingRecord, total_chunks: u64) -> Self {
        Self {
            meeting_id: record.meeting_id,
            title: record.title,
            status: record.status,
            language: record.language,
            full_transcript: record.full_transcript,
            summary: record.summary,
            agenda: record.agenda,
            total_chunks,
            start_time: record.start_time,
            end_time: record.end_time,
        }
    }
}

/// Listing view of one meeting.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingOverview {
    pub meeting_id: String,
    pub title: Option<String>,
    pub status: MeetingStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_chunks: u64,
}

/// Tracks one record per meeting and enforces the lifecycle state machine.
pub struct SessionRegistry {
    sessions: Arc<dyn SessionStore>,
    chunks: Arc<dyn ChunkStore>,
    events: Arc<dyn EventStore>,
}

impl SessionRegistry {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        chunks: Arc<dyn ChunkStore>,
        events: Arc<dyn EventStore>,
    ) -> Self {
        Self {
            sessions,
            chunks,
            events,
        }
    }

    /// Register a new meeting in `recording` state.
    ///
    /// Duplicate ids are an error, not a no-op: the caller owns id
    /// uniqueness and a silent overwrite would discard a live session.
    pub async fn start(
        &self,
        meeting_id: &str,
        title: Option<String>,
        language: Option<String>,
    ) -> Result<Meeting, MeetingError> {
        info!("Starting meeting: {}", meeting_id);

        let language = language.unwrap_or_else(|| "auto".to_string());
        let record = MeetingRecord::new(meeting_id.to_string(), title, language);

        let created = self
            .sessions
            .create(record.clone())
            .await
            .map_err(|e| MeetingError::store("create meeting", meeting_id, e))?;

        if !created {
            return Err(MeetingError::AlreadyExists(meeting_id.to_string()));
        }

        let label = record.title.clone().unwrap_or_else(|| meeting_id.to_string());
        let _ = self
            .events
            .append(SystemEvent::info(
                format!("Meeting started: {label}"),
                Some(meeting_id),
            ))
            .await;

        Ok(Meeting::from_record(record, 0))
    }

    /// Fetch one meeting with its live chunk count.
    pub async fn get(&self, meeting_id: &str) -> Result<Meeting, MeetingError> {
        let record = self
            .sessions
            .get(meeting_id)
            .await
            .map_err(|e| MeetingError::store("get meeting", meeting_id, e))?
            .ok_or_else(|| MeetingError::NotFound(meeting_id.to_string()))?;

        let total_chunks = self
            .chunks
            .count(meeting_id)
            .await
            .map_err(|e| MeetingError::store("count chunks", meeting_id, e))?;

        Ok(Meeting::from_record(record, total_chunks))
    }

    /// Commit transcript, summary, agenda, and end time in one operation,
    /// transitioning the meeting to `completed`. Repeated completion
    /// overwrites, last writer wins.
    pub async fn complete(
        &self,
        meeting_id: &str,
        full_transcript: String,
        summary: String,
        agenda: String,
    ) -> Result<(), MeetingError> {
        let outcome = CompletedMeeting {
            full_transcript,
            summary,
            agenda,
            end_time: Utc::now(),
        };

        let found = self
            .sessions
            .complete(meeting_id, outcome)
            .await
            .map_err(|e| MeetingError::store("complete meeting", meeting_id, e))?;

        if !found {
            return Err(MeetingError::NotFound(meeting_id.to_string()));
        }

        let _ = self
            .events
            .append(SystemEvent::info(
                format!("Meeting completed: {meeting_id}"),
                Some(meeting_id),
            ))
            .await;

        Ok(())
    }

    /// All meetings, newest first, with live chunk counts.
    pub async fn list(&self) -> Result<Vec<MeetingOverview>, MeetingError> {
        let records = self
            .sessions
            .list()
            .await
            .map_err(|e| MeetingError::store("list meetings", "*", e))?;

        let mut overviews = Vec::with_capacity(records.len());
        for record in records {
            let total_chunks = self
                .chunks
                .count(&record.meeting_id)
                .await
                .map_err(|e| MeetingError::store("count chunks", &record.meeting_id, e))?;

            overviews.push(MeetingOverview {
                meeting_id: record.meeting_id,
                title: record.title,
                status: record.status,
                start_time: record.start_time,
                end_time: record.end_time,
                total_chunks,
            });
        }

        Ok(overviews)
    }
}
