//! OpenAI implementation of the Collaborator trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use pipeline::ai::OpenAiCollaborator;
//! use pipeline::Pipeline;
//!
//! let collaborator = OpenAiCollaborator::new("sk-...").with_model("gpt-4o");
//! let pipeline = Pipeline::new(collaborator);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{CollaboratorError, CollaboratorResult};
use crate::security::SecretString;
use crate::traits::collaborator::{Collaborator, PromptKind};
use crate::types::config::PipelineConfig;

/// OpenAI-backed collaborator using the chat completions API.
#[derive(Clone)]
pub struct OpenAiCollaborator {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
    request_timeout: Duration,
}

impl OpenAiCollaborator {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.2,
            max_tokens: 1200,
            request_timeout: Duration::from_secs(60),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> CollaboratorResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| CollaboratorError::Auth("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Take model and decoding parameters from a pipeline config.
    pub fn with_config(mut self, config: &PipelineConfig) -> Self {
        self.model = config.model.clone();
        self.temperature = config.temperature;
        self.max_tokens = config.max_tokens;
        self.request_timeout = config.stage_timeout();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn system_prompt(kind: PromptKind) -> &'static str {
        match kind {
            PromptKind::ExtractFacts => {
                "You extract atomic, verifiable facts from documents. \
                 Every fact must quote its source. Respond with JSON only."
            }
            PromptKind::BuildOutline => {
                "You organize facts into hierarchical outlines. \
                 Cite facts by id. Respond with JSON only."
            }
            PromptKind::Summarize => {
                "You write executive summaries grounded in an outline. \
                 Cite supporting node ids. Respond with JSON only."
            }
            PromptKind::RepairJson => "Return valid JSON only. No markdown or explanation.",
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl Collaborator for OpenAiCollaborator {
    async fn generate(&self, kind: PromptKind, prompt: &str) -> CollaboratorResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt(kind).to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .timeout(self.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CollaboratorError::Timeout
                } else {
                    CollaboratorError::Http(e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(CollaboratorError::Quota),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                return Err(CollaboratorError::Auth(body));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(CollaboratorError::Http(format!("{status}: {body}")));
            }
            _ => {}
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Http(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CollaboratorError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_carries_over() {
        let config = PipelineConfig::default()
            .with_model("gpt-4o")
            .with_stage_timeout_secs(30);
        let collaborator = OpenAiCollaborator::new("sk-test").with_config(&config);

        assert_eq!(collaborator.model(), "gpt-4o");
        assert_eq!(collaborator.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let collaborator = OpenAiCollaborator::new("sk-super-secret");
        let debug = format!("{:?}", collaborator.api_key);
        assert!(!debug.contains("sk-super-secret"));
    }
}
