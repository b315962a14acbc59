//! Configuration management for the lead agent
//!
//! Two kinds of configuration live here:
//! - Runtime [`Settings`] loaded from the environment (`LEAD_AGENT_`
//!   prefix) with serde defaults for everything else
//! - The tenant model: [`ClientConfig`] and the static [`ClientRegistry`]
//!   that resolves a tenant id to its business profile

pub mod client;
pub mod registry;
pub mod settings;

pub use client::{
    AiFeatures, ClientConfig, ContactInfo, Industry, LeadCapture, LeadRouting,
    RedactedClientConfig, ResponseRule,
};
pub use registry::ClientRegistry;
pub use settings::{
    LlmSettings, ObservabilitySettings, ServerSettings, SessionSettings, Settings,
    load_settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
