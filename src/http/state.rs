use crate::analysis::MeetingOrchestrator;
use crate::ingest::IngestPipeline;
use crate::session::SessionRegistry;
use crate::store::ChunkStore;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SessionRegistry>,
    pub ingest: Arc<IngestPipeline>,
    pub orchestrator: Arc<MeetingOrchestrator>,
    /// Read directly by the per-chunk transcript endpoint.
    pub chunks: Arc<dyn ChunkStore>,
    /// Assumed for uploads that omit the X-Sample-Rate header.
    pub default_sample_rate: u32,
}

impl AppState {
    pub fn new(
        registry: Arc<SessionRegistry>,
        ingest: Arc<IngestPipeline>,
        orchestrator: Arc<MeetingOrchestrator>,
        chunks: Arc<dyn ChunkStore>,
        default_sample_rate: u32,
    ) -> Self {
        Self {
            registry,
            ingest,
            orchestrator,
            chunks,
            default_sample_rate,
        }
    }
}
