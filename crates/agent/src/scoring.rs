//! Lead scoring
//!
//! Each vertical registers a [`LeadScoringPolicy`] built from an ordered
//! table of weighted substring rules. Every matching rule adds its weight
//! (tiers are additive, there is no max-pick), the sum is clamped to
//! [0, 100], and the rationale concatenates the names of the rules that
//! fired. Scoring looks at the current message only, not prior history:
//! each turn re-qualifies the lead independently.

use serde::{Deserialize, Serialize};

use lead_agent_config::Industry;
use lead_agent_core::ConversationState;

/// Result of scoring one message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadScoreResult {
    /// 0 - 100
    pub score: u8,
    pub reasoning: String,
    /// Human-readable names of the rules that fired, in table order
    pub factors: Vec<String>,
}

impl LeadScoreResult {
    /// Write the score back into the session. The previous score is
    /// overwritten, not accumulated.
    pub fn apply(&self, state: &mut ConversationState) {
        state.lead_score = self.score;
        state.touch();
    }
}

/// Scores a message within one industry vertical
pub trait LeadScoringPolicy: Send + Sync {
    fn score(&self, message: &str, state: &ConversationState) -> LeadScoreResult;
}

/// One weighted substring rule
///
/// Fires when any keyword occurs in the lowercased message and, when an
/// `also` group is present, at least one of its keywords occurs too.
struct WeightedRule {
    keywords: &'static [&'static str],
    also: Option<&'static [&'static str]>,
    weight: u32,
    factor: &'static str,
}

impl WeightedRule {
    const fn plain(
        keywords: &'static [&'static str],
        weight: u32,
        factor: &'static str,
    ) -> Self {
        Self { keywords, also: None, weight, factor }
    }

    fn fires(&self, message_lower: &str) -> bool {
        let hit = self.keywords.iter().any(|k| message_lower.contains(k));
        match self.also {
            Some(group) => hit && group.iter().any(|k| message_lower.contains(k)),
            None => hit,
        }
    }
}

fn clamp_score(total: u32) -> u8 {
    total.min(100) as u8
}

fn sum_rules(rules: &[WeightedRule], message_lower: &str) -> (u32, Vec<String>) {
    let mut total = 0;
    let mut factors = Vec::new();
    for rule in rules {
        if rule.fires(message_lower) {
            total += rule.weight;
            factors.push(rule.factor.to_string());
        }
    }
    (total, factors)
}

/// Table-driven policy shared by the commerce-style verticals
struct RuleScorer {
    vertical: &'static str,
    rules: &'static [WeightedRule],
}

impl LeadScoringPolicy for RuleScorer {
    fn score(&self, message: &str, _state: &ConversationState) -> LeadScoreResult {
        let message_lower = message.to_lowercase();
        let (total, factors) = sum_rules(self.rules, &message_lower);
        let score = clamp_score(total);
        LeadScoreResult {
            score,
            reasoning: format!(
                "{} lead score: {}/100. {}",
                self.vertical,
                score,
                factors.join(", ")
            ),
            factors,
        }
    }
}

const REAL_ESTATE_RULES: &[WeightedRule] = &[
    WeightedRule::plain(&["budget", "price", "cost"], 20, "Budget mentioned"),
    WeightedRule::plain(&["soon", "urgent", "quick"], 15, "Timeline urgency"),
    WeightedRule::plain(&["house", "condo", "townhouse"], 10, "Specific property type"),
    WeightedRule::plain(&["area", "neighborhood", "location"], 10, "Location preference"),
    WeightedRule::plain(&["email", "phone", "contact"], 25, "Contact information provided"),
];

static REAL_ESTATE: RuleScorer = RuleScorer {
    vertical: "Real estate",
    rules: REAL_ESTATE_RULES,
};

const ECOMMERCE_RULES: &[WeightedRule] = &[
    WeightedRule::plain(&["laptop", "phone", "headphones"], 20, "Specific product interest"),
    WeightedRule::plain(&["buy", "purchase", "order"], 25, "Purchase intent"),
    WeightedRule::plain(&["budget", "price", "cost"], 15, "Budget consideration"),
    WeightedRule::plain(&["email", "phone", "contact"], 20, "Contact information provided"),
];

static ECOMMERCE: RuleScorer = RuleScorer {
    vertical: "Ecommerce",
    rules: ECOMMERCE_RULES,
};

/// Legal rules: case-type base, additive injury-severity tiers, economic
/// impact, per-practice-area complexity, liability strength, then the
/// generic urgency/contact/timeline signals.
const LEGAL_RULES: &[WeightedRule] = &[
    WeightedRule::plain(
        &[
            "accident", "injury", "divorce", "criminal", "immigration", "visa",
            "green card", "business", "corporate", "employment", "workplace",
            "real estate", "property", "estate", "will", "trust",
        ],
        25,
        "Specific case type",
    ),
    // Injury severity tiers are additive, not a single max pick.
    WeightedRule::plain(&["neck pain", "back pain", "whiplash"], 30, "Moderate injury severity"),
    WeightedRule::plain(&["broken", "fracture", "surgery"], 40, "Severe injury requiring treatment"),
    WeightedRule {
        keywords: &["hospital", "emergency room", "er"],
        also: Some(&["treatment", "admitted", "stayed"]),
        weight: 35,
        factor: "Hospital treatment required",
    },
    WeightedRule::plain(&["paralysis", "brain injury", "traumatic"], 60, "Catastrophic injury"),
    WeightedRule::plain(
        &["missed work", "lost wages", "can't work"],
        20,
        "Economic damages - lost income",
    ),
    WeightedRule::plain(
        &["medical bills", "hospital bills", "treatment costs"],
        25,
        "Economic damages - medical expenses",
    ),
    WeightedRule::plain(
        &["disability", "unable to work", "lost income"],
        30,
        "Economic damages - disability",
    ),
    WeightedRule::plain(
        &["work permit", "employment authorization", "job offer"],
        25,
        "Economic impact - employment opportunity",
    ),
    WeightedRule::plain(
        &["contract dispute", "breach of contract"],
        35,
        "Business case complexity - contract dispute",
    ),
    WeightedRule::plain(
        &["corporate formation", "llc", "incorporation"],
        25,
        "Business case complexity - corporate formation",
    ),
    WeightedRule::plain(
        &["merger", "acquisition", "m&a"],
        50,
        "Business case complexity - M&A transaction",
    ),
    WeightedRule::plain(
        &["intellectual property", "patent", "trademark"],
        40,
        "Business case complexity - IP protection",
    ),
    WeightedRule::plain(
        &["discrimination", "harassment", "hostile work environment"],
        40,
        "Employment case severity - discrimination/harassment",
    ),
    WeightedRule::plain(
        &["wrongful termination", "retaliation", "unlawful firing"],
        35,
        "Employment case severity - wrongful termination",
    ),
    WeightedRule::plain(
        &["wage theft", "overtime", "unpaid wages"],
        30,
        "Employment case severity - wage violations",
    ),
    WeightedRule::plain(
        &["fmla", "disability", "reasonable accommodation"],
        25,
        "Employment case severity - leave/disability",
    ),
    WeightedRule::plain(
        &["property dispute", "boundary", "easement"],
        30,
        "Real estate case value - property dispute",
    ),
    WeightedRule::plain(
        &["eviction", "landlord", "tenant"],
        25,
        "Real estate case value - landlord-tenant",
    ),
    WeightedRule::plain(
        &["foreclosure", "mortgage", "loan modification"],
        35,
        "Real estate case value - mortgage issues",
    ),
    WeightedRule::plain(
        &["title issue", "closing", "purchase agreement"],
        40,
        "Real estate case value - transaction issues",
    ),
    WeightedRule::plain(
        &["probate", "inheritance", "estate administration"],
        30,
        "Estate planning complexity - probate",
    ),
    WeightedRule::plain(
        &["trust administration", "trustee", "beneficiary"],
        35,
        "Estate planning complexity - trust administration",
    ),
    WeightedRule::plain(
        &["estate tax", "wealth transfer", "tax planning"],
        45,
        "Estate planning complexity - tax planning",
    ),
    WeightedRule::plain(
        &["guardianship", "power of attorney", "healthcare directive"],
        25,
        "Estate planning complexity - incapacity planning",
    ),
    WeightedRule::plain(
        &["drunk driver", "dui", "intoxicated"],
        25,
        "Clear liability - impaired driving",
    ),
    WeightedRule::plain(
        &["hit from behind", "rear-ended", "rear end"],
        15,
        "Clear liability - rear-end collision",
    ),
    WeightedRule::plain(
        &["red light", "stop sign", "ran red"],
        20,
        "Clear liability - traffic violation",
    ),
    WeightedRule::plain(
        &["texting", "distracted", "phone"],
        20,
        "Clear liability - distracted driving",
    ),
    WeightedRule::plain(&["urgent", "emergency", "immediately"], 20, "High urgency"),
    WeightedRule::plain(&["money", "damages", "settlement"], 15, "Financial stakes"),
    WeightedRule::plain(&["email", "phone", "contact"], 20, "Contact information provided"),
    WeightedRule::plain(&["soon", "quick", "asap"], 10, "Timeline urgency"),
];

/// Legal policy: the rule table plus a bonus when injury, economic-loss
/// and clear-liability phrases co-occur in the same message.
struct LegalPolicy;

impl LeadScoringPolicy for LegalPolicy {
    fn score(&self, message: &str, _state: &ConversationState) -> LeadScoreResult {
        let message_lower = message.to_lowercase();
        let (mut total, mut factors) = sum_rules(LEGAL_RULES, &message_lower);

        let has_injuries = ["pain", "injury", "broken"]
            .iter()
            .any(|k| message_lower.contains(k));
        let has_economic_loss = ["work", "income", "bills"]
            .iter()
            .any(|k| message_lower.contains(k));
        let has_clear_liability = ["drunk", "fault", "hit"]
            .iter()
            .any(|k| message_lower.contains(k));

        if has_injuries && has_economic_loss && has_clear_liability {
            total += 25;
            factors.push("Complete case profile bonus".to_string());
        }

        let score = clamp_score(total);
        LeadScoreResult {
            score,
            reasoning: format!("Legal lead score: {}/100. {}", score, factors.join(", ")),
            factors,
        }
    }
}

/// Flat score for tenants without a vertical
struct GeneralPolicy;

impl LeadScoringPolicy for GeneralPolicy {
    fn score(&self, _message: &str, _state: &ConversationState) -> LeadScoreResult {
        LeadScoreResult {
            score: 10,
            reasoning: "General inquiry lead score: 10/100".to_string(),
            factors: vec!["General inquiry".to_string()],
        }
    }
}

static LEGAL: LegalPolicy = LegalPolicy;
static GENERAL: GeneralPolicy = GeneralPolicy;

/// Select the scoring policy registered for an industry
pub fn policy_for(industry: Industry) -> &'static dyn LeadScoringPolicy {
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
    fn test_real_estate_example_scoring() {
        let result = policy_for(Industry::RealEstate).score(
            "I'm looking for a 3 bedroom house, budget around $400k, need to move soon",
            &state(),
        );
        // Budget (+20), timeline (+15) and property type (+10) all fire; no
        // contact info was given.
        assert!(result.score >= 45);
        assert!(result.score < 100);
        assert!(result.factors.contains(&"Budget mentioned".to_string()));
        assert!(result.factors.contains(&"Timeline urgency".to_string()));
        assert!(result.factors.contains(&"Specific property type".to_string()));
        assert!(!result.factors.contains(&"Contact information provided".to_string()));
    }

    #[test]
    fn test_legal_complete_profile_bonus() {
        let result = policy_for(Industry::Legal).score(
            "A drunk driver hit me from behind, I have neck pain and missed two weeks of work",
            &state(),
        );
        assert!(result.factors.contains(&"Complete case profile bonus".to_string()));
        assert!(result.factors.contains(&"Moderate injury severity".to_string()));
        assert!(result.factors.contains(&"Clear liability - impaired driving".to_string()));
    }

    #[test]
    fn test_score_is_clamped_to_100() {
        // Stacks case type, severity tiers, economic damages, liability and
        // urgency far past 100 before clamping.
        let result = policy_for(Industry::Legal).score(
            "drunk driver accident, broken neck, surgery, brain injury, paralysis, \
             missed work, medical bills, disability, urgent, settlement, phone",
            &state(),
        );
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_multiple_rules_in_same_category_all_fire() {
        let result = policy_for(Industry::Legal).score(
            "neck pain after surgery",
            &state(),
        );
        // Moderate (+30) and severe (+40) tiers are additive.
        assert!(result.factors.contains(&"Moderate injury severity".to_string()));
        assert!(result.factors.contains(&"Severe injury requiring treatment".to_string()));
    }

    #[test]
    fn test_hospital_rule_requires_both_groups() {
        let policy = policy_for(Industry::Legal);
        let without = policy.score("I went to the hospital", &state());
        assert!(!without.factors.contains(&"Hospital treatment required".to_string()));

        let with = policy.score("I was admitted to the hospital", &state());
        assert!(with.factors.contains(&"Hospital treatment required".to_string()));
    }

    #[test]
    fn test_ecommerce_scoring() {
        let result = policy_for(Industry::Ecommerce).score(
            "I want to buy a laptop, my budget is $800, email me",
            &state(),
        );
        assert_eq!(result.score, 20 + 25 + 15 + 20);
    }

    #[test]
    fn test_general_flat_score() {
        let result = policy_for(Industry::General).score("hello", &state());
        assert_eq!(result.score, 10);
        assert_eq!(result.factors, vec!["General inquiry".to_string()]);
    }

    #[test]
    fn test_apply_overwrites_score() {
        let mut session = state();
        session.lead_score = 80;
        let result = policy_for(Industry::General).score("hi", &session);
        result.apply(&mut session);
        assert_eq!(session.lead_score, 10);
    }
}
