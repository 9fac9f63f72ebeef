use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted chunk body. Ten seconds of 48kHz 16-bit mono is under
/// 1 MiB; this leaves generous headroom.
const MAX_CHUNK_BYTES: usize = 8 * 1024 * 1024;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Meeting lifecycle
        .route(
            "/api/meetings",
            get(handlers::list_meetings).post(handlers::start_meeting),
        )
        .route("/api/meetings/:meeting_id", get(handlers::get_meeting))
        .route("/api/meetings/:meeting_id/end", post(handlers::end_meeting))
        // Chunk ingestion (metadata in X-* headers alongside the PCM body)
        .route("/api/audio", post(handlers::upload_chunk))
        // Transcript queries and analysis
        .route(
            "/api/meetings/:meeting_id/transcript",
            get(handlers::get_transcript),
        )
        .route(
            "/api/meetings/:meeting_id/question",
            post(handlers::ask_question),
        )
        .route(
            "/api/meetings/:meeting_id/action-items",
            get(handlers::action_items),
        )
        .layer(DefaultBodyLimit::max(MAX_CHUNK_BYTES))
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
