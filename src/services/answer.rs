use super::GatewayError;
use crate::config::AnsweringConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are an AI meeting assistant. Your task is to \
answer questions about meetings based on the provided transcript.\n\n\
Guidelines:\n\
- Be concise and accurate\n\
- Quote relevant parts of the transcript when applicable\n\
- If the answer is not in the transcript, say so clearly\n\
- Extract action items, decisions, and key points when asked\n\
- Identify speakers if mentioned in the transcript";

/// Generated text plus the model that produced it.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub model: String,
}

/// Language-model answering boundary.
///
/// Summary, agenda, action items, and ad-hoc Q&A all go through this one
/// seam, parameterized only by prompt.
#[async_trait]
pub trait Answerer: Send + Sync {
    /// The model identifier to record when a request never completes.
    fn model_id(&self) -> &str;

    /// Ask `prompt` against `context` (the meeting transcript).
    async fn ask(&self, context: &str, prompt: &str) -> Result<Answer, GatewayError>;
}

/// Chat-completions HTTP answering client.
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatClient {
    pub fn new(config: &AnsweringConfig, api_key: Option<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            api_key,
        })
    }
}

#[async_trait]
impl Answerer for ChatClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn ask(&self, context: &str, prompt: &str) -> Result<Answer, GatewayError> {
        let user_message = format!(
            "Meeting Transcript:\n{context}\n\nQuestion: {prompt}\n\n\
             Please provide a clear and helpful answer based on the transcript."
        );

        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
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

        let body: ChatResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("response contained no choices".to_string()))?;

        Ok(Answer {
            text: choice.message.content,
            model: body.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}
