pub mod analysis;
pub mod config;
pub mod error;
pub mod http;
pub mod ingest;
pub mod services;
pub mod session;
pub mod store;

pub use analysis::{MeetingOrchestrator, MeetingWrapUp, QaReply};
pub use config::Config;
pub use error::MeetingError;
pub use http::{create_router, AppState};
pub use ingest::{ChunkUpload, IngestPipeline, IngestReceipt};
pub use services::{
    Answer, Answerer, ChatClient, GatewayError, Transcriber, Transcription, WhisperClient,
};
pub use session::{Meeting, MeetingOverview, SessionRegistry};
pub use store::{
    ChunkRecord, ChunkStore, EventStore, MeetingStatus, MemoryStore, QaStore, SessionStore,
    StoreError,
};
