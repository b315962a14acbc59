//! Core types for the lead agent
//!
//! This crate provides the conversation types shared across every other
//! crate: message history, the per-session conversation state, the user
//! profile bag, and the coarse conversation stage.

pub mod conversation;

pub use conversation::{
    ChatMessage, ConversationStage, ConversationState, Sender, UserProfile,
};
