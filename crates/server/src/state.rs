//! Shared application state

use std::sync::Arc;

use lead_agent_agent::{MessageProcessor, ResponseGenerator};
use lead_agent_config::{ClientRegistry, Settings};
use lead_agent_llm::{LlmBackend, OpenAiBackend};

use crate::session::SessionManager;

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub registry: &'static ClientRegistry,
    pub sessions: Arc<SessionManager>,
    pub processor: Arc<MessageProcessor>,
}

impl AppState {
    /// Build state from settings, wiring the generative backend into the
    /// response generator. Backend construction failure falls back to a
    /// generator without a model; the filler layer still guarantees a reply.
    pub fn new(settings: Settings) -> Self {
        let responder = match OpenAiBackend::new(settings.llm.clone()) {
            Ok(backend) => {
                let backend: Arc<dyn LlmBackend> = Arc::new(backend);
                ResponseGenerator::new(backend)
            }
            Err(e) => {
                tracing::warn!(error = %e, "LLM backend unavailable, canned responses only");
                ResponseGenerator::without_llm()
            }
        };

        let sessions = Arc::new(SessionManager::with_config(
            std::time::Duration::from_secs(settings.session.max_idle_secs),
            std::time::Duration::from_secs(settings.session.cleanup_interval_secs),
        ));

        Self {
            settings: Arc::new(settings),
            registry: ClientRegistry::shared(),
            sessions,
            processor: Arc::new(MessageProcessor::new(responder)),
        }
    }
}
