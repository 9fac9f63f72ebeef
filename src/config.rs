use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub audio: AudioConfig,
    pub transcription: TranscriptionConfig,
    pub answering: AnsweringConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    /// Sample rate assumed for uploads that omit the X-Sample-Rate header.
    pub sample_rate: u32,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptionConfig {
    /// Whisper-compatible transcription endpoint.
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct AnsweringConfig {
    /// Chat-completions endpoint.
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Config {
    /// Load from a config file, with `MEETINGD_*` environment variables
    /// overriding individual keys (e.g. `MEETINGD_SERVICE__HTTP__PORT`).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("MEETINGD").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
