//! Intent detection
//!
//! Each industry vertical registers an [`IntentClassifier`] holding an
//! ordered keyword table. Matching is case-insensitive substring
//! containment; the order of entries in a table is a deliberate priority:
//! the first group with a hit wins even if a later group would also match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lead_agent_config::Industry;
use lead_agent_core::ConversationState;

/// Coarse classification of what a message is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    PropertySearch,
    MarketInfo,
    ScheduleViewing,
    Selling,
    PersonalInjury,
    FamilyLaw,
    CriminalDefense,
    Consultation,
    ProductSearch,
    OrderStatus,
    Support,
    GeneralInquiry,
}

impl Intent {
    /// Wire tag used in responses and session history
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::PropertySearch => "PROPERTY_SEARCH",
            Intent::MarketInfo => "MARKET_INFO",
            Intent::ScheduleViewing => "SCHEDULE_VIEWING",
            Intent::Selling => "SELLING",
            Intent::PersonalInjury => "PERSONAL_INJURY",
            Intent::FamilyLaw => "FAMILY_LAW",
            Intent::CriminalDefense => "CRIMINAL_DEFENSE",
            Intent::Consultation => "CONSULTATION",
            Intent::ProductSearch => "PRODUCT_SEARCH",
            Intent::OrderStatus => "ORDER_STATUS",
            Intent::Support => "SUPPORT",
            Intent::GeneralInquiry => "GENERAL_INQUIRY",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency attached to a detected intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// Result of classifying one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    pub intent: Intent,
    /// 0.0 - 1.0
    pub confidence: f32,
    pub reasoning: String,
    pub urgency: Urgency,
    pub timestamp: DateTime<Utc>,
}

/// Classifies a message within one industry vertical
///
/// Implementations are pure: same message and table, same result. New
/// verticals are added by registering an implementation, not by extending
/// a branch.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, message: &str, state: &ConversationState) -> IntentResult;
}

/// Ordered keyword table backing a vertical's classifier
struct KeywordClassifier {
    vertical: &'static str,
    /// Priority-ordered intent groups
    table: &'static [(Intent, &'static [&'static str])],
}

impl KeywordClassifier {
    fn hit_urgency(intent: Intent) -> Urgency {
        if intent == Intent::CriminalDefense {
            Urgency::High
        } else {
            Urgency::Medium
        }
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, message: &str, _state: &ConversationState) -> IntentResult {
        let message_lower = message.to_lowercase();

        for (intent, keywords) in self.table {
            if keywords.iter().any(|k| message_lower.contains(k)) {
                return IntentResult {
                    intent: *intent,
                    confidence: 0.9,
                    reasoning: format!(
                        "Detected {} based on keywords: {}",
                        intent,
                        keywords.join(", ")
                    ),
                    urgency: Self::hit_urgency(*intent),
                    timestamp: Utc::now(),
                };
            }
        }

        IntentResult {
            intent: Intent::GeneralInquiry,
            confidence: 0.7,
            reasoning: format!("No specific {} intent detected", self.vertical),
            urgency: Urgency::Low,
            timestamp: Utc::now(),
        }
    }
}

/// Catch-all classifier for tenants without a vertical
struct GeneralClassifier;

impl IntentClassifier for GeneralClassifier {
    fn classify(&self, _message: &str, _state: &ConversationState) -> IntentResult {
        IntentResult {
            intent: Intent::GeneralInquiry,
            confidence: 0.8,
            reasoning: "General inquiry detected".to_string(),
            urgency: Urgency::Low,
            timestamp: Utc::now(),
        }
    }
}

static REAL_ESTATE: KeywordClassifier = KeywordClassifier {
    vertical: "real estate",
    table: &[
        (
            Intent::PropertySearch,
            &["buy", "house", "home", "property", "looking for", "find", "search", "available properties"],
        ),
        (
            Intent::MarketInfo,
            &["market", "price", "value", "trend", "worth", "appraisal"],
        ),
        (
            Intent::ScheduleViewing,
            &["view", "tour", "appointment", "schedule", "see", "visit"],
        ),
        (Intent::Selling, &["sell", "list", "market", "listing", "agent"]),
        (
            Intent::GeneralInquiry,
            &["hello", "hi", "help", "information", "what can you", "how can you", "what do you"],
        ),
    ],
};

static LEGAL: KeywordClassifier = KeywordClassifier {
    vertical: "legal",
    table: &[
        (
            Intent::PersonalInjury,
            &["accident", "injury", "hurt", "pain", "medical", "car crash", "slip"],
        ),
        (
            Intent::FamilyLaw,
            &["divorce", "custody", "child", "marriage", "family", "support"],
        ),
        (
            Intent::CriminalDefense,
            &["arrest", "charge", "criminal", "police", "court", "defense"],
        ),
        (
            Intent::Consultation,
            &["consult", "meet", "appointment", "talk", "discuss"],
        ),
        (Intent::GeneralInquiry, &["hello", "hi", "help", "information"]),
    ],
};

static ECOMMERCE: KeywordClassifier = KeywordClassifier {
    vertical: "ecommerce",
    table: &[
        (
            Intent::ProductSearch,
            &["product", "item", "buy", "purchase", "looking for", "find"],
        ),
        (
            Intent::OrderStatus,
            &["order", "track", "status", "shipping", "delivery"],
        ),
        (
            Intent::Support,
            &["help", "support", "problem", "issue", "return", "refund"],
        ),
        (Intent::GeneralInquiry, &["hello", "hi", "help", "information"]),
    ],
};

static GENERAL: GeneralClassifier = GeneralClassifier;

/// Select the classifier registered for an industry
pub fn classifier_for(industry: Industry) -> &'static dyn IntentClassifier {
    match industry {
        Industry::RealEstate => &REAL_ESTATE,
        Industry::Legal => &LEGAL,
        Industry::Ecommerce => &ECOMMERCE,
        Industry::General => &GENERAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ConversationState {
        ConversationState::new("s-1", "test")
    }

    #[test]
    fn test_property_search_detected() {
        let result = classifier_for(Industry::RealEstate)
            .classify("I'm looking for a 3 bedroom house", &state());
        assert_eq!(result.intent, Intent::PropertySearch);
        assert_eq!(result.confidence, 0.9);
        assert!(result.reasoning.contains("PROPERTY_SEARCH"));
    }

    #[test]
    fn test_first_group_wins_on_overlap() {
        // "buy" appears in PROPERTY_SEARCH, "market" in both MARKET_INFO and
        // SELLING; the earliest declared group takes priority.
        let result = classifier_for(Industry::RealEstate)
            .classify("should I buy now or wait for the market", &state());
        assert_eq!(result.intent, Intent::PropertySearch);

        let result = classifier_for(Industry::RealEstate)
            .classify("what is the market doing", &state());
        assert_eq!(result.intent, Intent::MarketInfo);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let result = classifier_for(Industry::Legal).classify("I had an ACCIDENT", &state());
        assert_eq!(result.intent, Intent::PersonalInjury);
    }

    #[test]
    fn test_criminal_defense_is_high_urgency() {
        let result = classifier_for(Industry::Legal).classify("I was arrested last night", &state());
        assert_eq!(result.intent, Intent::CriminalDefense);
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn test_miss_falls_back_to_general_inquiry() {
        let result = classifier_for(Industry::Ecommerce).classify("xyzzy", &state());
        assert_eq!(result.intent, Intent::GeneralInquiry);
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.urgency, Urgency::Low);
    }

    #[test]
    fn test_general_vertical_confidence() {
        let result = classifier_for(Industry::General).classify("hello there", &state());
        assert_eq!(result.intent, Intent::GeneralInquiry);
        assert_eq!(result.confidence, 0.8);
    }
}
