use super::{wav, GatewayError};
use crate::config::TranscriptionConfig;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

/// Result of transcribing one audio chunk.
#[derive(Debug, Clone)]
pub struct Transcription {
    pub text: String,
    /// Language the service detected, e.g. "en".
    pub language: String,
}

/// Speech-to-text boundary.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe raw PCM (mono, 16-bit) at the given sample rate. `language`
    /// is a hint; `None` lets the service detect it.
    async fn transcribe(
        &self,
        pcm: &[u8],
        sample_rate: u32,
        language: Option<&str>,
    ) -> Result<Transcription, GatewayError>;
}

/// Whisper-compatible HTTP transcription client.
pub struct WhisperClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
    language: Option<String>,
}

impl WhisperClient {
    pub fn new(config: &TranscriptionConfig, api_key: Option<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(
        &self,
        pcm: &[u8],
        sample_rate: u32,
        language: Option<&str>,
    ) -> Result<Transcription, GatewayError> {
        let wav_bytes = wav::wrap_pcm(pcm, sample_rate)?;

        let file = reqwest::multipart::Part::bytes(wav_bytes)
            .file_name("audio.wav")
            .mime_str("audio/wav")?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        if let Some(language) = language {
            form = form.text("language", language.to_string());
        }

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: TranscriptionResponse = response.json().await?;
        let language = body.language.unwrap_or_else(|| "unknown".to_string());

        info!(
            "Transcription successful ({} chars, language: {})",
            body.text.len(),
            language
        );

        Ok(Transcription {
            text: body.text,
            language,
        })
    }
}
