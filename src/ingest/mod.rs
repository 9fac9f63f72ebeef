//! Audio chunk ingestion
//!
//! Each uploaded chunk is persisted first, transcribed second, and merged
//! back third. A transcription failure degrades to an empty segment; the
//! audio is durable either way, so the client can re-upload the same chunk
//! number to retry.

mod pipeline;

pub use pipeline::{ChunkUpload, IngestPipeline, IngestReceipt};
