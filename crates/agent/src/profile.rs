//! Opportunistic user-profile extraction
//!
//! Scans each user message for contact details and budget figures and
//! fills the session's profile bag. Patterns are compiled once at startup
//! and a captured value never overwrites one collected earlier.

use once_cell::sync::Lazy;
use regex::Regex;

use lead_agent_core::UserProfile;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());

static BUDGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\s?\d[\d,]*(?:\.\d+)?\s?(?:[kKmM]\b)?").unwrap());

static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmy name is ([A-Za-z]+(?: [A-Za-z]+)?)").unwrap());

/// Extracts profile details from raw messages
pub struct ProfileExtractor;

impl ProfileExtractor {
    /// Fill empty profile fields from whatever the message contains
    pub fn extract(message: &str, profile: &mut UserProfile) {
        if profile.email.is_none() {
            if let Some(m) = EMAIL.find(message) {
                profile.email = Some(m.as_str().to_string());
            }
        }

        if profile.phone.is_none() {
            if let Some(m) = PHONE.find(message) {
                profile.phone = Some(m.as_str().to_string());
            }
        }

        if profile.budget.is_none() {
            if let Some(m) = BUDGET.find(message) {
                profile.budget = Some(m.as_str().trim().to_string());
            }
        }

        if profile.name.is_none() {
            if let Some(caps) = NAME.captures(message) {
                profile.name = Some(caps[1].to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_email_and_phone() {
        let mut profile = UserProfile::default();
        ProfileExtractor::extract(
            "reach me at jane.doe@example.com or (555) 123-4567",
            &mut profile,
        );
        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("(555) 123-4567"));
        assert!(profile.has_contact());
    }

    #[test]
    fn test_extracts_budget() {
        let mut profile = UserProfile::default();
        ProfileExtractor::extract("budget around $400k, need to move soon", &mut profile);
        assert_eq!(profile.budget.as_deref(), Some("$400k"));
    }

    #[test]
    fn test_first_value_sticks() {
        let mut profile = UserProfile::default();
        ProfileExtractor::extract("email me at first@example.com", &mut profile);
        ProfileExtractor::extract("actually use second@example.com", &mut profile);
        assert_eq!(profile.email.as_deref(), Some("first@example.com"));
    }

    #[test]
    fn test_extracts_name() {
        let mut profile = UserProfile::default();
        ProfileExtractor::extract("Hi, my name is Jane Doe", &mut profile);
        assert_eq!(profile.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_plain_message_leaves_profile_empty() {
        let mut profile = UserProfile::default();
        ProfileExtractor::extract("hello there", &mut profile);
        assert!(profile.email.is_none());
        assert!(profile.phone.is_none());
        assert!(profile.budget.is_none());
        assert!(profile.name.is_none());
    }
}
