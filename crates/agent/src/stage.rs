//! Conversation stage machine
//!
//! The stage is re-evaluated on every turn from the message count and the
//! current lead score alone. Because scoring is per-turn, a session that
//! reached `QualifiedLead` can drop back to `GatheringInfo` when a later
//! message scores lower; that behavior is intentional and kept.

use lead_agent_core::{ConversationState, ConversationStage};

/// Stage for a session with the given message count and lead score
pub fn next_stage(message_count: usize, lead_score: u8) -> ConversationStage {
    if message_count == 1 {
        ConversationStage::Initial
    } else if lead_score > 50 {
        ConversationStage::QualifiedLead
    } else {
        ConversationStage::GatheringInfo
    }
}

/// Re-evaluate and store the stage after a turn
pub fn advance(state: &mut ConversationState) {
    state.stage = next_stage(state.message_count, state.lead_score);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_is_initial() {
        assert_eq!(next_stage(1, 0), ConversationStage::Initial);
        // Even a strong first message stays initial.
        assert_eq!(next_stage(1, 90), ConversationStage::Initial);
    }

    #[test]
    fn test_score_over_fifty_qualifies() {
        assert_eq!(next_stage(2, 51), ConversationStage::QualifiedLead);
        assert_eq!(next_stage(10, 100), ConversationStage::QualifiedLead);
    }

    #[test]
    fn test_boundary_stays_gathering() {
        assert_eq!(next_stage(2, 50), ConversationStage::GatheringInfo);
        assert_eq!(next_stage(3, 0), ConversationStage::GatheringInfo);
    }

    #[test]
    fn test_stage_can_regress() {
        let mut state = ConversationState::new("s-1", "test");
        state.message_count = 2;
        state.lead_score = 80;
        advance(&mut state);
        assert_eq!(state.stage, ConversationStage::QualifiedLead);

        // A weaker later message re-qualifies downward.
        state.message_count = 3;
        state.lead_score = 10;
        advance(&mut state);
        assert_eq!(state.stage, ConversationStage::GatheringInfo);
    }
}
