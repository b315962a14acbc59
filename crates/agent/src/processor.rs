//! Message processing pipeline
//!
//! One call per turn: classify intent, re-score the lead, update the
//! session, resolve the reply, and advance the conversation stage.

use lead_agent_config::ClientConfig;
use lead_agent_core::ConversationState;

use crate::intent::{classifier_for, Intent};
use crate::profile::ProfileExtractor;
use crate::responder::ResponseGenerator;
use crate::scoring::policy_for;
use crate::stage;
use crate::AgentError;

/// Everything the HTTP layer needs to build the response envelope
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub response: String,
    pub lead_score: u8,
    pub intent: String,
    pub confidence: f32,
    pub reasoning: String,
}

/// Per-turn orchestration of the classification, scoring, and response
/// components
pub struct MessageProcessor {
    responder: ResponseGenerator,
}

impl MessageProcessor {
    pub fn new(responder: ResponseGenerator) -> Self {
        Self { responder }
    }

    /// Process one user message against its session and tenant config
    pub async fn process(
        &self,
        message: &str,
        state: &mut ConversationState,
        config: &ClientConfig,
    ) -> Result<ChatOutcome, AgentError> {
        let intent = classifier_for(config.industry).classify(message, state);
        let lead = policy_for(config.industry).score(message, state);

        lead.apply(state);
        state.record_intent(intent.intent.as_str());
        ProfileExtractor::extract(message, &mut state.user_profile);

        let response = self
            .responder
            .generate(message, &intent, &lead, state, config)
            .await;

        state.message_count += 1;
        stage::advance(state);

        tracing::info!(
            client_id = %config.client_id,
            session_id = %state.session_id,
            intent = %intent.intent,
            lead_score = lead.score,
            stage = %state.stage,
            "processed message"
        );

        Ok(ChatOutcome {
            response,
            lead_score: lead.score,
            intent: intent.intent.as_str().to_string(),
            confidence: intent.confidence,
            reasoning: lead.reasoning,
        })
    }

    /// Outcome substituted when the pipeline fails: the tenant's static
    /// fallback template with placeholders filled in
    pub fn fallback_outcome(config: &ClientConfig) -> ChatOutcome {
        ChatOutcome {
            response: config.rendered_fallback(),
            lead_score: 0,
            intent: Intent::GeneralInquiry.as_str().to_string(),
            confidence: 0.3,
            reasoning: "Fallback response used".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_agent_config::ClientRegistry;
    use lead_agent_core::ConversationStage;

    fn processor() -> MessageProcessor {
        MessageProcessor::new(ResponseGenerator::without_llm())
    }

    #[tokio::test]
    async fn test_real_estate_turn() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("real-estate-demo");
        let mut state = ConversationState::new("s-1", "real-estate-demo");

        let outcome = processor()
            .process(
                "I'm looking for a 3 bedroom house, budget around $400k, need to move soon",
                &mut state,
                config,
            )
            .await
            .unwrap();

        assert_eq!(outcome.intent, "PROPERTY_SEARCH");
        assert_eq!(outcome.confidence, 0.9);
        assert!(outcome.lead_score >= 45 && outcome.lead_score < 100);
        assert_eq!(state.lead_score, outcome.lead_score);
        assert_eq!(state.detected_intents, vec!["PROPERTY_SEARCH".to_string()]);
        assert_eq!(state.message_count, 1);
        assert_eq!(state.stage, ConversationStage::Initial);
        assert_eq!(state.user_profile.budget.as_deref(), Some("$400k"));
    }

    #[tokio::test]
    async fn test_stage_advances_on_later_turns() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("law-firm-demo");
        let mut state = ConversationState::new("s-1", "law-firm-demo");

        let p = processor();
        p.process("hello", &mut state, config).await.unwrap();
        assert_eq!(state.stage, ConversationStage::Initial);

        let outcome = p
            .process(
                "A drunk driver hit me from behind, I have neck pain and missed two weeks of work",
                &mut state,
                config,
            )
            .await
            .unwrap();
        assert!(outcome.lead_score > 50);
        assert_eq!(state.stage, ConversationStage::QualifiedLead);

        // A weak follow-up drops the stage again; scoring is per-turn.
        p.process("ok", &mut state, config).await.unwrap();
        assert_eq!(state.stage, ConversationStage::GatheringInfo);
    }

    #[tokio::test]
    async fn test_intents_accumulate_across_turns() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("ecommerce-demo");
        let mut state = ConversationState::new("s-1", "ecommerce-demo");

        let p = processor();
        p.process("I want to buy a laptop", &mut state, config).await.unwrap();
        p.process("where is my order", &mut state, config).await.unwrap();

        assert_eq!(
            state.detected_intents,
            vec!["PRODUCT_SEARCH".to_string(), "ORDER_STATUS".to_string()]
        );
    }

    #[test]
    fn test_fallback_outcome_renders_template() {
        let registry = ClientRegistry::builtin();
        let outcome = MessageProcessor::fallback_outcome(registry.get("law-firm-demo"));
        assert!(outcome.response.contains("(555) LAW-FIRM"));
        assert_eq!(outcome.lead_score, 0);
        assert_eq!(outcome.intent, "GENERAL_INQUIRY");
        assert_eq!(outcome.confidence, 0.3);
    }
}
