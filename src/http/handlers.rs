use super::state::AppState;
use crate::error::MeetingError;
use crate::ingest::ChunkUpload;
use crate::session::MeetingOverview;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::error;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartMeetingRequest {
    /// Optional meeting ID (if not provided, generate UUID)
    pub meeting_id: Option<String>,

    /// Optional meeting title
    pub title: Option<String>,

    /// Language code or "auto" for detection (default: "auto")
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartMeetingResponse {
    pub meeting_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UploadChunkResponse {
    pub meeting_id: String,
    pub chunk_number: u64,
    pub transcript: String,
    pub language_detected: String,
}

#[derive(Debug, Serialize)]
pub struct EndMeetingResponse {
    pub meeting_id: String,
    pub transcript_length: usize,
    pub total_chunks: usize,
    pub summary: String,
    pub agenda: String,
}

#[derive(Debug, Deserialize)]
pub struct AskQuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskQuestionResponse {
    pub meeting_id: String,
    pub question: String,
    pub answer: String,
    pub response_time: f64,
}

#[derive(Debug, Serialize)]
pub struct ActionItemsResponse {
    pub meeting_id: String,
    pub action_items: String,
    pub response_time: f64,
}

#[derive(Debug, Serialize)]
pub struct TranscriptChunk {
    pub chunk_number: u64,
    pub text: Option<String>,
    pub timestamp: u64,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub meeting_id: String,
    pub chunks: Vec<TranscriptChunk>,
}

#[derive(Debug, Serialize)]
pub struct ListMeetingsResponse {
    pub meetings: Vec<MeetingOverview>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_reply(err: MeetingError) -> axum::response::Response {
    let status = match &err {
        MeetingError::AlreadyExists(_) | MeetingError::SessionClosed(_) => StatusCode::CONFLICT,
        MeetingError::NotFound(_) | MeetingError::NoChunks(_) => StatusCode::NOT_FOUND,
        MeetingError::TranscriptUnavailable(_) => StatusCode::BAD_REQUEST,
        MeetingError::Store { .. } => {
            error!("Store failure: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

fn bad_request(message: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
}

fn required_header(headers: &HeaderMap, name: &str) -> Result<String, String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| format!("missing or invalid {name} header"))
}

fn numeric_header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Result<T, String> {
    required_header(headers, name)?
        .parse()
        .map_err(|_| format!("{name} header is not a valid number"))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/meetings
/// Start a new meeting recording session
pub async fn start_meeting(
    State(state): State<AppState>,
    Json(req): Json<StartMeetingRequest>,
) -> impl IntoResponse {
    // Generate or use provided meeting ID
    let meeting_id = req
        .meeting_id
        .unwrap_or_else(|| format!("meeting-{}", uuid::Uuid::new_v4()));

    match state.registry.start(&meeting_id, req.title, req.language).await {
        Ok(meeting) => (
            StatusCode::OK,
            Json(StartMeetingResponse {
                meeting_id: meeting.meeting_id.clone(),
                status: "recording".to_string(),
                message: format!("Meeting recording started: {}", meeting.meeting_id),
            }),
        )
            .into_response(),
        Err(err) => error_reply(err),
    }
}

/// POST /api/audio
/// Upload one raw PCM chunk; metadata travels in headers alongside the body
pub async fn upload_chunk(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let meeting_id = match required_header(&headers, "X-Meeting-ID") {
        Ok(value) => value,
        Err(msg) => return bad_request(msg),
    };
    let chunk_number = match numeric_header::<u64>(&headers, "X-Chunk-Number") {
        Ok(value) => value,
        Err(msg) => return bad_request(msg),
    };
    let chunk_timestamp = match numeric_header::<u64>(&headers, "X-Timestamp") {
        Ok(value) => value,
        Err(msg) => return bad_request(msg),
    };
    let sample_rate = match headers.get("X-Sample-Rate") {
        Some(_) => match numeric_header::<u32>(&headers, "X-Sample-Rate") {
            Ok(value) => value,
            Err(msg) => return bad_request(msg),
        },
        None => state.default_sample_rate,
    };

    let upload = ChunkUpload {
        meeting_id: meeting_id.clone(),
        chunk_number,
        chunk_timestamp,
        audio: body.to_vec(),
        sample_rate,
    };

    match state.ingest.ingest(upload).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(UploadChunkResponse {
                meeting_id,
                chunk_number: receipt.chunk_number,
                transcript: receipt.transcript,
                language_detected: receipt.detected_language,
            }),
        )
            .into_response(),
        Err(err) => error_reply(err),
    }
}

/// POST /api/meetings/:meeting_id/end
/// End a meeting and generate the final transcript, summary, and agenda
pub async fn end_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> impl IntoResponse {
    match state.orchestrator.end_meeting(&meeting_id).await {
        Ok(wrap_up) => (
            StatusCode::OK,
            Json(EndMeetingResponse {
                meeting_id: wrap_up.meeting_id,
                transcript_length: wrap_up.transcript_length,
                total_chunks: wrap_up.total_chunks,
                summary: wrap_up.summary,
                agenda: wrap_up.agenda,
            }),
        )
            .into_response(),
        Err(err) => error_reply(err),
    }
}

/// POST /api/meetings/:meeting_id/question
/// Ask a question about a finalized meeting
pub async fn ask_question(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
    Json(req): Json<AskQuestionRequest>,
) -> impl IntoResponse {
    match state.orchestrator.ask_question(&meeting_id, &req.question).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(AskQuestionResponse {
                meeting_id,
                question: req.question,
                answer: reply.answer,
                response_time: reply.response_time,
            }),
        )
            .into_response(),
        Err(err) => error_reply(err),
    }
}

/// GET /api/meetings/:meeting_id/action-items
/// Extract action items from a finalized meeting
pub async fn action_items(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> impl IntoResponse {
    match state.orchestrator.action_items(&meeting_id).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(ActionItemsResponse {
                meeting_id,
                action_items: reply.answer,
                response_time: reply.response_time,
            }),
        )
            .into_response(),
        Err(err) => error_reply(err),
    }
}

/// GET /api/meetings/:meeting_id
/// Get meeting detail including summary and agenda
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> impl IntoResponse {
    match state.registry.get(&meeting_id).await {
        Ok(meeting) => (StatusCode::OK, Json(meeting)).into_response(),
        Err(err) => error_reply(err),
    }
}

/// GET /api/meetings/:meeting_id/transcript
/// Get the per-chunk transcript segments for a meeting
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(meeting_id): Path<String>,
) -> impl IntoResponse {
    if let Err(err) = state.registry.get(&meeting_id).await {
        return error_reply(err);
    }

    match state.chunks.list_by_meeting(&meeting_id).await {
        Ok(chunks) => (
            StatusCode::OK,
            Json(TranscriptResponse {
                meeting_id,
                chunks: chunks
                    .into_iter()
                    .map(|chunk| TranscriptChunk {
                        chunk_number: chunk.chunk_number,
                        text: chunk.transcript_segment,
                        timestamp: chunk.chunk_timestamp,
                    })
                    .collect(),
            }),
        )
            .into_response(),
        Err(err) => error_reply(MeetingError::store("list chunks", &meeting_id, err)),
    }
}

/// GET /api/meetings
/// List all meetings, newest first
pub async fn list_meetings(State(state): State<AppState>) -> impl IntoResponse {
    match state.registry.list().await {
        Ok(meetings) => (StatusCode::OK, Json(ListMeetingsResponse { meetings })).into_response(),
        Err(err) => error_reply(err),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
