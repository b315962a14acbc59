//! Response generation
//!
//! Resolution order, first match wins:
//! 1. Tenant keyword-template rule (ordered scan, placeholder substitution)
//! 2. Intent-based canned reply
//! 3. Generative backend with an industry system prompt
//! 4. Industry-flavored filler sentence, chosen by the pluggable picker;
//!    tenants without a vertical get their static fallback template instead
//!
//! The generator itself never fails: every path ends in non-empty text.

use std::sync::Arc;

use rand::Rng;

use lead_agent_config::{ClientConfig, Industry};
use lead_agent_core::ConversationState;
use lead_agent_llm::{system_prompt, LlmBackend, Message};

use crate::intent::{Intent, IntentResult};
use crate::scoring::LeadScoreResult;

/// Chooses among the filler sentences
///
/// Pluggable so tests can pin the selection.
pub trait FillerPicker: Send + Sync {
    /// Index into a list of `len` options; `len` is always >= 1
    fn pick(&self, len: usize) -> usize;
}

/// Uniform random pick
pub struct UniformPicker;

impl FillerPicker for UniformPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic pick for tests
pub struct FixedPicker(pub usize);

impl FillerPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Hand-written filler sentences used when the generative call fails
pub fn filler_sentences(industry: Industry) -> &'static [&'static str] {
    match industry {
        Industry::RealEstate => &[
            "I'm here to help with all your real estate needs! I can assist with \
             property searches, market information, scheduling viewings, and \
             connecting you with our agents. What would you like to know about?",
            "I'm here to make your real estate journey easier. I can help you find \
             properties, understand market trends, and connect with our experienced \
             agents. How can I assist you today?",
            "I'm your personal real estate assistant! I can help you search for \
             properties, get market insights, schedule viewings, and answer any real \
             estate questions you might have. What brings you here today?",
        ],
        Industry::Legal => &[
            "I'm here to help you understand our legal services and connect you with \
             the right attorney. I can assist with case assessments, consultation \
             scheduling, and general legal information. How can I help you today?",
            "I'm here to guide you through our legal services and help you find the \
             right attorney for your case. What legal matter can I help you with?",
            "I'm your legal assistant! I can help you understand our practice areas, \
             schedule consultations, and provide general information about our \
             services. What brings you here today?",
        ],
        Industry::Ecommerce => &[
            "I'm here to help you find the perfect tech products and assist with \
             your shopping needs! I can help with product recommendations, order \
             tracking, and customer support. How can I assist you today?",
            "I'm here to make your shopping experience better. I can help you find \
             products, track orders, and answer any questions about our offerings. \
             What can I help you with?",
            "I'm your personal shopping assistant! I can help you discover great \
             products, track your orders, and provide excellent customer support. \
             What brings you here today?",
        ],
        // No vertical flavor to offer; callers use the tenant fallback.
        Industry::General => &[],
    }
}

/// Canned reply for a handful of well-known intents
fn intent_reply(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::PropertySearch => Some(
            "I'd be happy to help you find the perfect property! What type of home \
             are you looking for, and what's your budget range?",
        ),
        Intent::MarketInfo => Some(
            "I can provide you with current market information! What specific area \
             or property type are you interested in?",
        ),
        Intent::PersonalInjury => Some(
            "Personal Injury Case Assessment:\n\nBased on your description, this \
             appears to be a strong personal injury case. Key factors we look at are \
             clear liability, the severity of your injuries, and economic damages \
             such as lost wages.\n\nNext steps:\n- Schedule a free consultation to \
             discuss your case\n- Document all medical treatments and expenses\n- \
             Keep records of missed work and lost wages\n- Don't speak to insurance \
             companies without legal representation\n\nOur contingency fee: no fees \
             unless we win your case!",
        ),
        Intent::FamilyLaw => Some(
            "I can help with family law matters. What specific type of family law \
             issue are you dealing with?",
        ),
        Intent::ProductSearch => Some(
            "I'd love to help you find the perfect product! What type of item are \
             you looking for?",
        ),
        Intent::OrderStatus => Some(
            "I can help you track your order! Please provide your order number.",
        ),
        _ => None,
    }
}

/// Resolves a reply for one turn
pub struct ResponseGenerator {
    llm: Option<Arc<dyn LlmBackend>>,
    picker: Box<dyn FillerPicker>,
}

impl ResponseGenerator {
    /// Generator backed by the given model
    pub fn new(llm: Arc<dyn LlmBackend>) -> Self {
        Self {
            llm: Some(llm),
            picker: Box::new(UniformPicker),
        }
    }

    /// Generator with no generative backend; resolution skips straight from
    /// the canned layers to the filler step
    pub fn without_llm() -> Self {
        Self {
            llm: None,
            picker: Box::new(UniformPicker),
        }
    }

    /// Replace the filler picker (deterministic selection in tests)
    pub fn with_picker(mut self, picker: Box<dyn FillerPicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Resolve the reply for a message
    pub async fn generate(
        &self,
        message: &str,
        intent: &IntentResult,
        _lead: &LeadScoreResult,
        _state: &ConversationState,
        config: &ClientConfig,
    ) -> String {
        // 1. Tenant keyword rule, declaration order.
        if let Some(reply) = config.matched_response(message) {
            return reply;
        }

        // 2. Intent-based canned reply.
        if let Some(reply) = intent_reply(intent.intent) {
            return reply.to_string();
        }

        // 3. Generative backend.
        if let Some(ref llm) = self.llm {
            let messages = [
                Message::system(system_prompt(config)),
                Message::user(message),
            ];
            match llm.generate(&messages).await {
                Ok(text) => return text,
                Err(e) => {
                    tracing::warn!(
                        client_id = %config.client_id,
                        error = %e,
                        "generative call failed, using filler response"
                    );
                }
            }
        }

        // 4. Filler sentence, or the tenant fallback when the vertical has none.
        self.filler(config)
    }

    fn filler(&self, config: &ClientConfig) -> String {
        let options = filler_sentences(config.industry);
        if options.is_empty() {
            return config.rendered_fallback();
        }
        options[self.picker.pick(options.len())].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use lead_agent_config::ClientRegistry;
    use lead_agent_llm::LlmError;

    use crate::intent::Urgency;

    struct FailingBackend;

    #[async_trait]
    impl LlmBackend for FailingBackend {
        async fn generate(&self, _messages: &[Message]) -> Result<String, LlmError> {
            Err(LlmError::Network("connection refused".into()))
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    fn result(intent: Intent) -> IntentResult {
        IntentResult {
            intent,
            confidence: 0.9,
            reasoning: String::new(),
            urgency: Urgency::Medium,
            timestamp: Utc::now(),
        }
    }

    fn lead() -> LeadScoreResult {
        LeadScoreResult {
            score: 0,
            reasoning: String::new(),
            factors: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_keyword_rule_beats_intent_reply() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("law-firm-demo");
        let state = ConversationState::new("s-1", "law-firm-demo");

        let generator = ResponseGenerator::without_llm();
        let reply = generator
            .generate(
                "A drunk driver hit me from behind, I have neck pain and missed two weeks of work",
                &result(Intent::PersonalInjury),
                &lead(),
                &state,
                config,
            )
            .await;

        // The tenant's own assessment template fires at step 1 and carries
        // its rendered phone number; the generic intent reply does not.
        assert!(reply.contains("(555) LAW-FIRM"));
    }

    #[tokio::test]
    async fn test_intent_reply_when_no_rule_matches() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("ecommerce-demo");
        let state = ConversationState::new("s-1", "ecommerce-demo");

        let generator = ResponseGenerator::without_llm();
        let reply = generator
            .generate(
                "I need a new gadget",
                &result(Intent::ProductSearch),
                &lead(),
                &state,
                config,
            )
            .await;

        assert!(reply.contains("What type of item are you looking for?"));
    }

    #[tokio::test]
    async fn test_llm_failure_degrades_to_filler() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("real-estate-demo");
        let state = ConversationState::new("s-1", "real-estate-demo");

        let generator = ResponseGenerator::new(Arc::new(FailingBackend))
            .with_picker(Box::new(FixedPicker(1)));
        let reply = generator
            .generate(
                "zzz nothing matches this",
                &result(Intent::GeneralInquiry),
                &lead(),
                &state,
                config,
            )
            .await;

        assert_eq!(reply, filler_sentences(Industry::RealEstate)[1]);
    }

    #[tokio::test]
    async fn test_unknown_tenant_gets_default_fallback() {
        let registry = ClientRegistry::builtin();
        let config = registry.get("acme-co");
        let state = ConversationState::new("s-1", "acme-co");

        let generator = ResponseGenerator::without_llm();
        let reply = generator
            .generate("hello", &result(Intent::GeneralInquiry), &lead(), &state, config)
            .await;

        assert_eq!(
            reply,
            "Thank you for contacting us. Please call (555) 123-4567 for assistance."
        );
    }

    #[test]
    fn test_fixed_picker_wraps() {
        assert_eq!(FixedPicker(5).pick(3), 2);
    }
}
