//! HTTP API for meeting clients
//!
//! This module provides the REST surface over the meeting pipeline:
//! - POST /api/meetings - Start a meeting
//! - POST /api/audio - Upload one PCM chunk (metadata in X-* headers)
//! - POST /api/meetings/:id/end - Finalize a meeting
//! - POST /api/meetings/:id/question - Ask about a finalized meeting
//! - GET  /api/meetings/:id/action-items - Extract action items
//! - GET  /api/meetings - List meetings
//! - GET  /api/meetings/:id - Meeting detail
//! - GET  /api/meetings/:id/transcript - Per-chunk segments
//! - GET  /health - Health check
//!
//! Handlers are transport glue only; every route delegates to a pipeline
//! component and maps its error kind to a status code.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
