//! LLM backend implementations
//!
//! An OpenAI-compatible chat-completions backend. The request carries a
//! bounded timeout; there is no retry loop, failures degrade immediately
//! to the caller's fallback path.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use lead_agent_config::LlmSettings;

use crate::prompt::Message;
use crate::LlmError;

/// LLM backend trait
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a reply for the given messages
    async fn generate(&self, messages: &[Message]) -> Result<String, LlmError>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// OpenAI chat-completions backend
#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client,
    settings: LlmSettings,
}

impl OpenAiBackend {
    /// Create a new backend from LLM settings
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.settings.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn generate(&self, messages: &[Message]) -> Result<String, LlmError> {
        // A missing key is a caught configuration error, not a crash.
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Configuration("API key not set".to_string()))?;

        let request = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: messages.iter().map(|m| m.into()).collect(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("{status}: {body}")));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("empty completion".to_string()))?;

        tracing::debug!(model = %self.settings.model, "LLM completion received");

        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

// OpenAI API wire types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

impl From<&Message> for WireMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role.to_string(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_conversion() {
        let msg = Message::user("Hello");
        let wire: WireMessage = (&msg).into();
        assert_eq!(wire.role, "user");
        assert_eq!(wire.content, "Hello");
    }

    #[test]
    fn test_api_url() {
        let backend = OpenAiBackend::new(LlmSettings::default()).unwrap();
        assert_eq!(backend.api_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_missing_key_is_caught_error() {
        let backend = OpenAiBackend::new(LlmSettings::default()).unwrap();
        let err = backend
            .generate(&[Message::system("You are helpful."), Message::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Configuration(_)));
    }
}
