use super::{
    ChunkRecord, ChunkStore, CompletedMeeting, EventStore, MeetingRecord, MeetingStatus,
    NewQaInteraction, QaInteraction, QaStore, SessionStore, StoreError, SystemEvent,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// In-process store backing all four persistence traits.
///
/// Chunks live in a `BTreeMap` keyed by chunk number, so ordered retrieval
/// falls out of the key order regardless of arrival order. Every upsert
/// replaces the whole `ChunkRecord` under the write lock, which gives the
/// per-row atomicity the ingestion pipeline relies on.
#[derive(Default)]
pub struct MemoryStore {
    meetings: RwLock<HashMap<String, MeetingRecord>>,
    chunks: RwLock<HashMap<String, BTreeMap<u64, ChunkRecord>>>,
    interactions: RwLock<Vec<QaInteraction>>,
    events: RwLock<Vec<SystemEvent>>,
    next_interaction_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_interaction_id: AtomicU64::new(1),
            ..Self::default()
        }
    }

    /// Snapshot of the Q&A history, oldest first.
    pub async fn interactions(&self) -> Vec<QaInteraction> {
        self.interactions.read().await.clone()
    }

    /// Snapshot of the audit log, oldest first.
    pub async fn events(&self) -> Vec<SystemEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, meeting: MeetingRecord) -> Result<bool, StoreError> {
        let mut meetings = self.meetings.write().await;
        if meetings.contains_key(&meeting.meeting_id) {
            return Ok(false);
        }
        meetings.insert(meeting.meeting_id.clone(), meeting);
        Ok(true)
    }

    async fn get(&self, meeting_id: &str) -> Result<Option<MeetingRecord>, StoreError> {
        Ok(self.meetings.read().await.get(meeting_id).cloned())
    }

    async fn complete(
        &self,
        meeting_id: &str,
        outcome: CompletedMeeting,
    ) -> Result<bool, StoreError> {
        let mut meetings = self.meetings.write().await;
        match meetings.get_mut(meeting_id) {
            Some(meeting) => {
                meeting.status = MeetingStatus::Completed;
                meeting.full_transcript = Some(outcome.full_transcript);
                meeting.summary = Some(outcome.summary);
                meeting.agenda = Some(outcome.agenda);
                meeting.end_time = Some(outcome.end_time);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<MeetingRecord>, StoreError> {
        let mut records: Vec<MeetingRecord> = self.meetings.read().await.values().cloned().collect();
        records.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(records)
    }
}

#[async_trait]
impl ChunkStore for MemoryStore {
    async fn upsert(&self, chunk: ChunkRecord) -> Result<(), StoreError> {
        let mut chunks = self.chunks.write().await;
        chunks
            .entry(chunk.meeting_id.clone())
            .or_default()
            .insert(chunk.chunk_number, chunk);
        Ok(())
    }

    async fn list_by_meeting(&self, meeting_id: &str) -> Result<Vec<ChunkRecord>, StoreError> {
        let chunks = self.chunks.read().await;
        Ok(chunks
            .get(meeting_id)
            .map(|per_meeting| per_meeting.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn count(&self, meeting_id: &str) -> Result<u64, StoreError> {
        let chunks = self.chunks.read().await;
        Ok(chunks
            .get(meeting_id)
            .map(|per_meeting| per_meeting.len() as u64)
            .unwrap_or(0))
    }
}

#[async_trait]
impl QaStore for MemoryStore {
    async fn append(&self, interaction: NewQaInteraction) -> Result<QaInteraction, StoreError> {
        let stored = QaInteraction {
            id: self.next_interaction_id.fetch_add(1, Ordering::SeqCst),
            meeting_id: interaction.meeting_id,
            question: interaction.question,
            answer: interaction.answer,
            model_used: interaction.model_used,
            response_time: interaction.response_time,
            asked_at: Utc::now(),
        };
        self.interactions.write().await.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn append(&self, event: SystemEvent) -> Result<(), StoreError> {
        self.events.write().await.push(event);
        Ok(())
    }
}
