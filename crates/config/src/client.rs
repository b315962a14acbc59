//! Tenant configuration model
//!
//! A [`ClientConfig`] is one tenant's business profile: identity, industry
//! vertical, contact details, the ordered keyword-to-template response
//! rules, and vertical-specific lead metadata. Configs are immutable for
//! the process lifetime and only ever read by other components.

use serde::{Deserialize, Serialize};

/// Industry vertical a tenant belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    RealEstate,
    Legal,
    Ecommerce,
    #[default]
    General,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::RealEstate => "real_estate",
            Industry::Legal => "legal",
            Industry::Ecommerce => "ecommerce",
            Industry::General => "general",
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tenant contact record, substituted into response templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ContactInfo {
    /// Substitute `{phone}`, `{email}`, `{website}` and `{address}` in a
    /// template. Missing fields render as empty strings, never as the
    /// literal placeholder.
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{phone}", self.phone.as_deref().unwrap_or(""))
            .replace("{email}", self.email.as_deref().unwrap_or(""))
            .replace("{website}", self.website.as_deref().unwrap_or(""))
            .replace("{address}", self.address.as_deref().unwrap_or(""))
    }
}

/// One keyword-group to template rule
///
/// Keywords are matched as case-insensitive substrings; the first rule in
/// declaration order whose group has a hit wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRule {
    /// Lowercase keywords, any of which triggers the rule
    pub keywords: Vec<String>,
    /// Response template, may contain contact placeholders
    pub template: String,
}

impl ResponseRule {
    /// Build a rule from a `"kw1|kw2|kw3"` keyword group
    pub fn new(keywords: &str, template: impl Into<String>) -> Self {
        Self {
            keywords: keywords
                .split('|')
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            template: template.into(),
        }
    }

    /// Whether any keyword occurs in the (already lowercased) message
    pub fn matches(&self, message_lower: &str) -> bool {
        self.keywords.iter().any(|k| message_lower.contains(k.as_str()))
    }
}

/// AI feature flags exposed per tenant
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AiFeatures {
    #[serde(default)]
    pub lead_scoring: bool,
    #[serde(default)]
    pub case_assessment: bool,
    #[serde(default)]
    pub dynamic_responses: bool,
    #[serde(default)]
    pub intent_detection: bool,
    #[serde(default)]
    pub followup_generation: bool,
}

impl AiFeatures {
    /// All features on
    pub fn all() -> Self {
        Self {
            lead_scoring: true,
            case_assessment: true,
            dynamic_responses: true,
            intent_detection: true,
            followup_generation: true,
        }
    }

    /// Names of the enabled features
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.lead_scoring {
            names.push("lead_scoring");
        }
        if self.case_assessment {
            names.push("case_assessment");
        }
        if self.dynamic_responses {
            names.push("dynamic_responses");
        }
        if self.intent_detection {
            names.push("intent_detection");
        }
        if self.followup_generation {
            names.push("followup_generation");
        }
        names
    }
}

/// Lead-capture configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadCapture {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub required_fields: Vec<String>,

    #[serde(default)]
    pub optional_fields: Vec<String>,

    /// Case types for service verticals
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub case_types: Vec<String>,

    /// Product categories for commerce verticals
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub product_categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub budget_ranges: Vec<String>,
}

/// Lead-routing thresholds for high-touch verticals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadRouting {
    #[serde(default)]
    pub high_value_threshold: u8,
    #[serde(default)]
    pub senior_attorney_threshold: u8,
    #[serde(default)]
    pub urgent_escalation_threshold: u8,
}

/// One tenant's complete business profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Tenant identifier
    pub client_id: String,
    /// Display name of the business
    pub business_name: String,
    /// Industry vertical, selects the classifier and scoring policy
    pub industry: Industry,
    /// Contact record used for placeholder substitution
    #[serde(default)]
    pub contact: ContactInfo,
    /// Ordered keyword-to-template rules; order is match priority
    #[serde(default)]
    pub responses: Vec<ResponseRule>,
    /// Static fallback template used when the pipeline fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_response: Option<String>,
    #[serde(default)]
    pub ai_features: AiFeatures,
    #[serde(default)]
    pub lead_capture: LeadCapture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_routing: Option<LeadRouting>,
}

impl ClientConfig {
    /// Find the first response rule matching the message, in declaration
    /// order, and render its template.
    pub fn matched_response(&self, message: &str) -> Option<String> {
        let message_lower = message.to_lowercase();
        self.responses
            .iter()
            .find(|rule| rule.matches(&message_lower))
            .map(|rule| self.contact.render(&rule.template))
    }

    /// Render the tenant's static fallback template
    pub fn rendered_fallback(&self) -> String {
        let template = self
            .fallback_response
            .as_deref()
            .unwrap_or("I'm here to help! How can I assist you today?");
        self.contact.render(template)
    }

    /// Public view of this config, safe to return over HTTP
    pub fn redacted(&self) -> RedactedClientConfig {
        RedactedClientConfig {
            client_id: self.client_id.clone(),
            business_name: self.business_name.clone(),
            industry: self.industry,
            available_features: self
                .ai_features
                .enabled()
                .into_iter()
                .map(String::from)
                .collect(),
            has_lead_capture: self.lead_capture.enabled,
        }
    }
}

/// Redacted tenant view for the config endpoint
///
/// Never exposes the raw keyword/response tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedClientConfig {
    pub client_id: String,
    pub business_name: String,
    pub industry: Industry,
    pub available_features: Vec<String>,
    pub has_lead_capture: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_rules(rules: Vec<ResponseRule>) -> ClientConfig {
        ClientConfig {
            client_id: "test".into(),
            business_name: "Test Co".into(),
            industry: Industry::General,
            contact: ContactInfo {
                phone: Some("(555) 123-4567".into()),
                email: None,
                website: None,
                address: None,
            },
            responses: rules,
            fallback_response: None,
            ai_features: AiFeatures::default(),
            lead_capture: LeadCapture::default(),
            lead_routing: None,
        }
    }

    #[test]
    fn test_rule_matching_is_case_insensitive() {
        let rule = ResponseRule::new("hello|hi", "Greetings!");
        assert!(rule.matches("well HELLO there".to_lowercase().as_str()));
        assert!(!rule.matches("goodbye"));
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let config = config_with_rules(vec![
            ResponseRule::new("order", "first"),
            ResponseRule::new("order|track", "second"),
        ]);
        // Both rules match; declaration order decides.
        assert_eq!(config.matched_response("track my order").as_deref(), Some("first"));
    }

    #[test]
    fn test_placeholder_substitution_is_total() {
        let contact = ContactInfo {
            phone: Some("(555) 000-1111".into()),
            ..ContactInfo::default()
        };
        let rendered = contact.render("Call {phone} or write {email} / {website} / {address}");
        assert_eq!(rendered, "Call (555) 000-1111 or write  /  / ");
        assert!(!rendered.contains('{'));
    }

    #[test]
    fn test_rendered_fallback_uses_contact() {
        let config = config_with_rules(Vec::new());
        let config = ClientConfig {
            fallback_response: Some("Please call {phone}.".into()),
            ..config
        };
        assert_eq!(config.rendered_fallback(), "Please call (555) 123-4567.");
    }
}
