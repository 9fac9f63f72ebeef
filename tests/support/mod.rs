// Shared test wiring: stub service clients, a failing chunk store, and a
// fully wired pipeline over the in-memory store.
#![allow(dead_code)]

use async_trait::async_trait;
use meetingd::services::{Answer, Answerer, GatewayError, Transcriber, Transcription};
use meetingd::store::{ChunkRecord, ChunkStore, MemoryStore, StoreError};
use meetingd::{ChunkUpload, IngestPipeline, MeetingOrchestrator, SessionRegistry};
use std::sync::Arc;

/// Transcriber that returns the PCM bytes as UTF-8 text, so tests control
/// segment content through the uploaded audio. Empty audio yields empty text
/// (a chunk that "never transcribed").
pub struct EchoTranscriber;

#[async_trait]
impl Transcriber for EchoTranscriber {
    async fn transcribe(
        &self,
        pcm: &[u8],
        _sample_rate: u32,
        _language: Option<&str>,
    ) -> Result<Transcription, GatewayError> {
        Ok(Transcription {
            text: String::from_utf8_lossy(pcm).into_owned(),
            language: "en".to_string(),
        })
    }
}

/// Transcriber that always fails.
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(
        &self,
        _pcm: &[u8],
        _sample_rate: u32,
        _language: Option<&str>,
    ) -> Result<Transcription, GatewayError> {
        Err(GatewayError::Status {
            status: 503,
            body: "transcription backend offline".to_string(),
        })
    }
}

/// Answerer that replies `reply to: <prompt>`, optionally failing whenever
/// the prompt contains a given fragment.
pub struct StubAnswerer {
    fail_when_prompt_contains: Option<String>,
}

impl StubAnswerer {
    pub fn reliable() -> Self {
        Self {
            fail_when_prompt_contains: None,
        }
    }

    pub fn failing_on(fragment: &str) -> Self {
        Self {
            fail_when_prompt_contains: Some(fragment.to_string()),
        }
    }
}

#[async_trait]
impl Answerer for StubAnswerer {
    fn model_id(&self) -> &str {
        "stub-model"
    }

    async fn ask(&self, _context: &str, prompt: &str) -> Result<Answer, GatewayError> {
        if let Some(fragment) = &self.fail_when_prompt_contains {
            if prompt.contains(fragment) {
                return Err(GatewayError::Status {
                    status: 500,
                    body: "model overloaded".to_string(),
                });
            }
        }

        Ok(Answer {
            text: format!("reply to: {prompt}"),
            model: "stub-model".to_string(),
        })
    }
}

/// Chunk store whose every operation fails, for store-failure propagation.
pub struct FailingChunkStore;

#[async_trait]
impl ChunkStore for FailingChunkStore {
    async fn upsert(&self, _chunk: ChunkRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("chunk store down".to_string()))
    }

    async fn list_by_meeting(&self, _meeting_id: &str) -> Result<Vec<ChunkRecord>, StoreError> {
        Err(StoreError::Unavailable("chunk store down".to_string()))
    }

    async fn count(&self, _meeting_id: &str) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable("chunk store down".to_string()))
    }
}

/// A fully wired pipeline over one in-memory store.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub registry: Arc<SessionRegistry>,
    pub ingest: Arc<IngestPipeline>,
    pub orchestrator: Arc<MeetingOrchestrator>,
}

pub fn harness(transcriber: Arc<dyn Transcriber>, answerer: Arc<dyn Answerer>) -> Harness {
    let store = Arc::new(MemoryStore::new());

    let registry = Arc::new(SessionRegistry::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let ingest = Arc::new(IngestPipeline::new(
        store.clone(),
        store.clone(),
        transcriber,
        store.clone(),
    ));
    let orchestrator = Arc::new(MeetingOrchestrator::new(
        registry.clone(),
        store.clone(),
        store.clone(),
        answerer,
        store.clone(),
    ));

    Harness {
        store,
        registry,
        ingest,
        orchestrator,
    }
}

pub fn echo_harness() -> Harness {
    harness(Arc::new(EchoTranscriber), Arc::new(StubAnswerer::reliable()))
}

/// Build an upload whose transcription (under `EchoTranscriber`) is `text`.
pub fn upload(meeting_id: &str, chunk_number: u64, text: &str) -> ChunkUpload {
    ChunkUpload {
        meeting_id: meeting_id.to_string(),
        chunk_number,
        chunk_timestamp: chunk_number * 10_000,
        audio: text.as_bytes().to_vec(),
        sample_rate: 16_000,
    }
}
