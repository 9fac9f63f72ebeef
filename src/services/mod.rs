//! External service boundaries: speech-to-text and language-model answering
//!
//! Both are consumed through request/response traits so the pipeline never
//! depends on a concrete provider. `WhisperClient` and `ChatClient` talk to
//! OpenAI-compatible HTTP endpoints with bounded timeouts; failures surface
//! as `GatewayError` and are degraded by the callers, never propagated.

mod answer;
mod transcribe;
pub mod wav;

use thiserror::Error;

pub use answer::{Answer, Answerer, ChatClient};
pub use transcribe::{Transcriber, Transcription, WhisperClient};

/// A failure talking to an external service.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("could not frame audio: {0}")]
    Audio(#[from] hound::Error),
}
