use crate::config::LlmConfig;
use crate::modules::session::ConversationTurn;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("LLM returned an empty reply")]
    EmptyReply,

    #[error("API key is not configured")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

impl From<&ConversationTurn> for ChatMessage {
    fn from(turn: &ConversationTurn) -> Self {
        Self::new(turn.role.as_str(), turn.content.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, history: &[ConversationTurn]) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: history.iter().map(ChatMessage::from).collect(),
        }
    }
}

/// Remote text generation. The only suspension point in handling a message.
#[async_trait]
pub trait LlmCapability: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}

pub struct MistralClient {
    client: Client,
    config: LlmConfig,
}

impl MistralClient {
    pub fn new(config: LlmConfig) -> Result<Self, GenerationError> {
        if config.api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        Ok(Self {
            client: Client::new(),
            config,
        })
    }

    pub fn build_payload(&self, request: &CompletionRequest) -> Value {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage::new("system", request.system_prompt.clone()));
        messages.extend(request.messages.iter().cloned());

        json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "top_p": self.config.top_p,
            "safe_prompt": self.config.safe_prompt,
        })
    }

    pub fn extract_content(response: &Value) -> Result<String, GenerationError> {
        response["choices"][0]["message"]["content"]
            .as_str()
            .map(|content| content.to_string())
            .ok_or_else(|| {
                GenerationError::MalformedPayload("No content in completion response".to_string())
            })
    }
}

#[async_trait]
impl LlmCapability for MistralClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        let payload = self.build_payload(request);
        tracing::debug!(model = %self.config.model, messages = request.messages.len(), "sending completion request");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "completion API error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;

        Self::extract_content(&raw)
    }
}
