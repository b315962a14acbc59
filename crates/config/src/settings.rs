//! Runtime settings
//!
//! Loaded from environment variables with the `LEAD_AGENT_` prefix
//! (double underscore as section separator, e.g.
//! `LEAD_AGENT_SERVER__PORT=8080`); every field has a serde default so an
//! empty environment yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level runtime settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub observability: ObservabilitySettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS origin restrictions
    #[serde(default)]
    pub cors_enabled: bool,

    /// Allowed CORS origins when enabled
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8001
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: false,
            cors_origins: Vec::new(),
        }
    }
}

/// Generative-model backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Model name/ID
    #[serde(default = "default_model")]
    pub model: String,

    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key; falls back to `OPENAI_API_KEY` from the environment
    #[serde(default)]
    pub api_key: Option<String>,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_max_tokens() -> usize {
    150
}
fn default_temperature() -> f32 {
    0.7
}
fn default_llm_timeout() -> u64 {
    10
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Session store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Idle window after which a session is reaped, in seconds
    #[serde(default = "default_max_idle")]
    pub max_idle_secs: u64,

    /// Interval between reaper sweeps, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_max_idle() -> u64 {
    3600 // 1 hour
}
fn default_cleanup_interval() -> u64 {
    300 // 5 minutes
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_idle_secs: default_max_idle(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilitySettings {
    /// Default log level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from the environment
///
/// Environment variables override serde defaults; the API key additionally
/// falls back to the conventional `OPENAI_API_KEY` variable.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let loaded = config::Config::builder()
        .add_source(
            config::Environment::with_prefix("LEAD_AGENT")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        )
        .build()?;

    let mut settings: Settings = loaded.try_deserialize()?;

    if settings.llm.api_key.is_none() {
        settings.llm.api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8001);
        assert_eq!(settings.llm.max_tokens, 150);
        assert_eq!(settings.session.max_idle_secs, 3600);
        assert_eq!(settings.session.cleanup_interval_secs, 300);
        assert!(settings.llm.api_key.is_none());
    }

    #[test]
    fn test_load_settings_empty_env() {
        let settings = load_settings().expect("defaults should deserialize");
        assert_eq!(settings.llm.model, "gpt-3.5-turbo");
        assert_eq!(settings.observability.log_level, "info");
    }
}
