//! Persistence boundaries for meetings, chunks, Q&A history, and audit events
//!
//! The pipeline only ever talks to these traits; `MemoryStore` is the bundled
//! in-process implementation used by the daemon and the test suite. A real
//! deployment can put a database behind the same traits without touching the
//! pipeline.

mod memory;
mod records;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryStore;
pub use records::{
    ChunkRecord, CompletedMeeting, EventLevel, MeetingRecord, MeetingStatus, NewQaInteraction,
    QaInteraction, SystemEvent,
};

/// A store-layer failure. Fatal to the request that hit it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed storage of meeting records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new meeting. Returns `false` (and stores nothing) if the id
    /// is already registered.
    async fn create(&self, meeting: MeetingRecord) -> Result<bool, StoreError>;

    async fn get(&self, meeting_id: &str) -> Result<Option<MeetingRecord>, StoreError>;

    /// Transition a meeting to `completed`, committing transcript, summary,
    /// agenda, and end time in one operation. Returns `false` if the meeting
    /// does not exist. An already-completed meeting is overwritten.
    async fn complete(
        &self,
        meeting_id: &str,
        outcome: CompletedMeeting,
    ) -> Result<bool, StoreError>;

    /// All meetings, ordered by start time descending.
    async fn list(&self) -> Result<Vec<MeetingRecord>, StoreError>;
}

/// Keyed storage of audio chunks, identity (meeting_id, chunk_number).
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Insert or replace the whole row for (meeting_id, chunk_number).
    /// Must be atomic per row: concurrent upserts of the same key resolve
    /// last-writer-wins with no field interleaving.
    async fn upsert(&self, chunk: ChunkRecord) -> Result<(), StoreError>;

    /// All chunks for a meeting, ordered by chunk number ascending.
    async fn list_by_meeting(&self, meeting_id: &str) -> Result<Vec<ChunkRecord>, StoreError>;

    /// Live count of chunks stored for a meeting.
    async fn count(&self, meeting_id: &str) -> Result<u64, StoreError>;
}

/// Append-only Q&A history.
#[async_trait]
pub trait QaStore: Send + Sync {
    /// Append an interaction, assigning its sequence id.
    async fn append(&self, interaction: NewQaInteraction) -> Result<QaInteraction, StoreError>;
}

/// Append-only audit log. Never read by the pipeline.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn append(&self, event: SystemEvent) -> Result<(), StoreError>;
}
