//! Generative-model integration
//!
//! Features:
//! - Pluggable [`LlmBackend`] trait
//! - OpenAI-compatible chat-completions backend over reqwest
//! - Industry-aware system prompt construction

pub mod backend;
pub mod prompt;

pub use backend::{LlmBackend, OpenAiBackend};
pub use prompt::{system_prompt, Message, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}
