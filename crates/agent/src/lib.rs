//! Conversational lead-qualification pipeline
//!
//! Features:
//! - Per-vertical intent classification
//! - Per-vertical weighted lead scoring
//! - Opportunistic user-profile extraction
//! - Layered response resolution with generative fallback
//! - Conversation stage machine

pub mod intent;
pub mod processor;
pub mod profile;
pub mod responder;
pub mod scoring;
pub mod stage;

pub use intent::{classifier_for, Intent, IntentClassifier, IntentResult, Urgency};
pub use processor::{ChatOutcome, MessageProcessor};
pub use profile::ProfileExtractor;
pub use responder::{filler_sentences, FillerPicker, FixedPicker, ResponseGenerator, UniformPicker};
pub use scoring::{policy_for, LeadScoreResult, LeadScoringPolicy};
pub use stage::{advance, next_stage};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Intent error: {0}")]
    Intent(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Response error: {0}")]
    Response(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

impl From<lead_agent_llm::LlmError> for AgentError {
    fn from(err: lead_agent_llm::LlmError) -> Self {
        AgentError::Llm(err.to_string())
    }
}
