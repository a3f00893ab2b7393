use crate::capabilities::traits::ConversationalSupport;
use crate::config::SupportConfig;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, instrument};

const SYSTEM_PROMPT: &str = "You are Dr. Emily Hartman, a warm and experienced clinical psychologist.\n\
Respond with emotional attunement, gentle normalization, practical guidance,\n\
and strengths-focused support. Ask open-ended questions.\n\
Do not use brackets or labels.";

/// Reply used when no language model is configured.
pub const UNAVAILABLE_FALLBACK: &str = "I hear you. It sounds like you’ve been carrying a lot lately. \
Many people feel overwhelmed when multiple things pile up at once. \
What’s been the hardest part for you recently?";

/// Reply used when the language model call fails.
pub const ERROR_FALLBACK: &str = "I’m here with you. Something went wrong on my side, but your feelings still matter. \
Can you tell me a little more about what you’re experiencing right now?";

// --- Generation parameters ---
const NUM_PREDICT: u32 = 250;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

/// Request body for Ollama's `/api/chat` endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    options: ChatOptions,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Supportive replies from a local Ollama model.
pub struct OllamaSupport {
    client: Client,
    base_url: String,
    model: String,
    request_timeout: Duration,
}

impl OllamaSupport {
    pub fn new(config: &SupportConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            request_timeout: config.timeout,
        }
    }

    async fn chat(&self, text: &str) -> Result<String, AppError> {
        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            options: ChatOptions {
                num_predict: NUM_PREDICT,
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
            stream: false,
        };

        // The deadline covers the body as well as the headers.
        timeout(self.request_timeout, self.exchange(&payload)).await?
    }

    async fn exchange(&self, payload: &ChatRequest<'_>) -> Result<String, AppError> {
        let res = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "Chat request failed with status {}: {}",
                status, body
            )));
        }

        let body: ChatResponse = res
            .json()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        Ok(body.message.content.trim().to_string())
    }
}

#[async_trait]
impl ConversationalSupport for OllamaSupport {
    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn respond(&self, text: &str) -> String {
        match self.chat(text).await {
            Ok(reply) => {
                info!(reply_len = reply.len(), "Model replied");
                reply
            }
            Err(e) => {
                error!("Conversational support failed: {}", e);
                ERROR_FALLBACK.to_string()
            }
        }
    }
}

/// Canned reply for deployments without a language model.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSupport;

#[async_trait]
impl ConversationalSupport for StaticSupport {
    async fn respond(&self, _text: &str) -> String {
        UNAVAILABLE_FALLBACK.to_string()
    }
}

/// Picks the support backend from configuration.
pub fn from_config(config: &SupportConfig) -> Box<dyn ConversationalSupport> {
    if config.enabled {
        info!(base_url = %config.base_url, model = %config.model, "Using Ollama for conversational support");
        Box::new(OllamaSupport::new(config))
    } else {
        info!("Language model disabled, using static support replies");
        Box::new(StaticSupport)
    }
}
