//! Prompt construction
//!
//! Builds the industry-specific system instruction sent together with the
//! raw user message when the canned-response layers produce no reply.

use std::fmt;

use serde::{Deserialize, Serialize};

use lead_agent_config::{ClientConfig, Industry};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Build the system instruction for a tenant
///
/// The base block carries the business identity and contact record; the
/// industry block sets role, tone, and scope limits (the legal variant
/// explicitly forbids giving specific legal advice).
pub fn system_prompt(config: &ClientConfig) -> String {
    let base = format!(
        "You are a helpful and professional AI assistant for {name}.\n\n\
         Business Information:\n\
         - Company: {name}\n\
         - Industry: {industry}\n\
         - Phone: {phone}\n\
         - Email: {email}\n\
         - Website: {website}\n\n\
         Your role is to:",
        name = config.business_name,
        industry = config.industry,
        phone = config.contact.phone.as_deref().unwrap_or("Not provided"),
        email = config.contact.email.as_deref().unwrap_or("Not provided"),
        website = config.contact.website.as_deref().unwrap_or("Not provided"),
    );

    let role_block = match config.industry {
        Industry::RealEstate => {
            "\n- Help customers with property searches, market information, and real estate inquiries\
             \n- Provide information about buying, selling, and renting properties\
             \n- Assist with scheduling viewings and connecting with agents\
             \n- Answer questions about market trends, property values, and neighborhoods\
             \n- Be friendly, professional, and knowledgeable about real estate\
             \n- Always maintain the context of being a real estate assistant\
             \n- If asked about properties, ask for preferences like budget, location, and property type\
             \n- Keep responses concise but helpful (max 2-3 sentences)"
        }
        Industry::Legal => {
            "\n- Help potential clients understand legal services and practice areas\
             \n- Provide general information about legal processes and procedures\
             \n- Assist with scheduling consultations and connecting with attorneys\
             \n- Answer questions about fees, office hours, and services\
             \n- Be professional, empathetic, and knowledgeable about legal matters\
             \n- Always maintain the context of being a legal assistant\
             \n- If asked about legal cases, ask for relevant details like case type and urgency\
             \n- Keep responses concise but helpful (max 2-3 sentences)\
             \n- Note: You cannot provide specific legal advice, only general information"
        }
        Industry::Ecommerce => {
            "\n- Help customers with product searches, recommendations, and purchases\
             \n- Provide information about products, pricing, and availability\
             \n- Assist with order tracking, returns, and customer service\
             \n- Answer questions about shipping, policies, and promotions\
             \n- Be friendly, helpful, and knowledgeable about products\
             \n- Always maintain the context of being an e-commerce assistant\
             \n- If asked about products, ask for preferences like budget and use case\
             \n- Keep responses concise but helpful (max 2-3 sentences)"
        }
        Industry::General => {
            "\n- Provide helpful and professional assistance\
             \n- Be friendly and knowledgeable about the business\
             \n- Keep responses concise but helpful (max 2-3 sentences)"
        }
    };

    format!("{base}{role_block}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_agent_config::ClientRegistry;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_legal_prompt_limits_scope() {
        let registry = ClientRegistry::builtin();
        let prompt = system_prompt(registry.get("law-firm-demo"));
        assert!(prompt.contains("Justice Partners Law Firm"));
        assert!(prompt.contains("cannot provide specific legal advice"));
    }

    #[test]
    fn test_prompt_tolerates_missing_contact() {
        let registry = ClientRegistry::builtin();
        let prompt = system_prompt(registry.get("unknown-tenant"));
        assert!(prompt.contains("Email: Not provided"));
    }
}
