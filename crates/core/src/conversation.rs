//! Conversation types: messages, stages, and per-session state

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// End-user message
    User,
    /// Agent reply
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single message in the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message text
    pub text: String,
    /// Who sent it
    pub sender: Sender,
    /// When it was recorded
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Create a bot message
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }
}

/// Coarse lifecycle bucket of a session
///
/// Re-evaluated on every turn from the message count and the current lead
/// score, so a session may move back from `QualifiedLead` to
/// `GatheringInfo` when a later message scores lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    /// First message of the conversation
    #[default]
    Initial,
    /// Conversation under way, lead not yet qualified
    GatheringInfo,
    /// Lead score has crossed the qualification threshold
    QualifiedLead,
}

impl ConversationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStage::Initial => "initial",
            ConversationStage::GatheringInfo => "gathering_info",
            ConversationStage::QualifiedLead => "qualified_lead",
        }
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User details collected opportunistically over the conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Budget as stated by the user, kept verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferences: Vec<String>,
}

impl UserProfile {
    /// True once any contact field has been captured
    pub fn has_contact(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}

/// Per-session conversation state
///
/// Owned by the session store; mutated on every turn. The lead score is
/// overwritten (not accumulated) each turn and always stays in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    /// Opaque session identifier
    pub session_id: String,
    /// Tenant the session belongs to
    pub client_id: String,
    /// Ordered message history, two entries appended per turn
    pub history: Vec<ChatMessage>,
    /// Current lead score, re-computed per turn
    pub lead_score: u8,
    /// Intents detected so far, in order of appearance
    pub detected_intents: Vec<String>,
    /// Opportunistically collected user details
    pub user_profile: UserProfile,
    /// Coarse conversation stage
    pub stage: ConversationStage,
    /// Last time this session saw activity
    pub last_activity: DateTime<Utc>,
    /// Number of user turns processed
    pub message_count: usize,
}

impl ConversationState {
    /// Create a fresh session
    pub fn new(session_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            client_id: client_id.into(),
            history: Vec::new(),
            lead_score: 0,
            detected_intents: Vec::new(),
            user_profile: UserProfile::default(),
            stage: ConversationStage::Initial,
            last_activity: Utc::now(),
            message_count: 0,
        }
    }

    /// Append a message to the history
    pub fn push_message(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// Refresh the activity timestamp
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Whether the session has been idle longer than `max_idle`
    pub fn is_expired(&self, max_idle: Duration) -> bool {
        Utc::now() - self.last_activity > max_idle
    }

    /// Record a detected intent tag
    pub fn record_intent(&mut self, intent: impl Into<String>) {
        self.detected_intents.push(intent.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = ConversationState::new("s-1", "law-firm-demo");
        assert_eq!(state.stage, ConversationStage::Initial);
        assert_eq!(state.lead_score, 0);
        assert!(state.history.is_empty());
        assert_eq!(state.message_count, 0);
    }

    #[test]
    fn test_history_accumulates() {
        let mut state = ConversationState::new("s-1", "default");
        state.push_message(ChatMessage::user("hello"));
        state.push_message(ChatMessage::bot("hi there"));
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].sender, Sender::User);
        assert_eq!(state.history[1].sender, Sender::Bot);
    }

    #[test]
    fn test_expiry_window() {
        let mut state = ConversationState::new("s-1", "default");
        assert!(!state.is_expired(Duration::hours(1)));

        state.last_activity = Utc::now() - Duration::hours(2);
        assert!(state.is_expired(Duration::hours(1)));

        state.touch();
        assert!(!state.is_expired(Duration::hours(1)));
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&ConversationStage::QualifiedLead).unwrap();
        assert_eq!(json, "\"qualified_lead\"");
    }
}
