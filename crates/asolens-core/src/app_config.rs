use std::net::SocketAddr;

use crate::keywords::Platform;
use crate::provider_id::ProviderId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, read once at startup by the binaries.
///
/// Generation overrides (`*_model`, `temperature`, `max_tokens`) are `None`
/// when unset so that the provider selector can apply its built-in defaults
/// beneath them.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub default_provider: Option<ProviderId>,
    pub gemini_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub claude_model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i64>,
    pub aso_lookup_url: String,
    pub aso_lookup_api_key: Option<String>,
    pub aso_platform: Platform,
    pub aso_pacing_ms: u64,
    pub store_country: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("default_provider", &self.default_provider)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("claude_model", &self.claude_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("aso_lookup_url", &self.aso_lookup_url)
            .field(
                "aso_lookup_api_key",
                &self.aso_lookup_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("aso_platform", &self.aso_platform)
            .field("aso_pacing_ms", &self.aso_pacing_ms)
            .field("store_country", &self.store_country)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
