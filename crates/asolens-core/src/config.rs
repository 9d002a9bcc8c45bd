use crate::app_config::{AppConfig, Environment};
use crate::keywords::Platform;
use crate::provider_id::ProviderId;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. Empty values count as unset, so `AI_PROVIDER=`
/// in a `.env` file behaves like an absent line.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_owned()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let bind_addr = or_default("ASOLENS_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("ASOLENS_BIND_ADDR", e.to_string()))?;

    let env = parse_environment(&or_default("ASOLENS_ENV", "development"))?;
    let log_level = or_default("ASOLENS_LOG_LEVEL", "info");

    let default_provider = optional("AI_PROVIDER")
        .map(|raw| raw.parse::<ProviderId>())
        .transpose()
        .map_err(|e| invalid("AI_PROVIDER", e.to_string()))?;

    let temperature = optional("AI_TEMPERATURE")
        .map(|raw| {
            raw.parse::<f32>()
                .map_err(|e| invalid("AI_TEMPERATURE", e.to_string()))
                .and_then(|t| {
                    if t.is_finite() {
                        Ok(t)
                    } else {
                        Err(invalid("AI_TEMPERATURE", "must be a finite number".into()))
                    }
                })
        })
        .transpose()?;

    let max_tokens = optional("AI_MAX_TOKENS")
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|e| invalid("AI_MAX_TOKENS", e.to_string()))
        })
        .transpose()?;

    let aso_platform = or_default("ASO_PLATFORM", "itunes")
        .parse::<Platform>()
        .map_err(|reason| invalid("ASO_PLATFORM", reason))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        default_provider,
        gemini_api_key: optional("GEMINI_API_KEY"),
        anthropic_api_key: optional("ANTHROPIC_API_KEY"),
        gemini_model: optional("AI_MODEL_GEMINI"),
        claude_model: optional("AI_MODEL_CLAUDE"),
        temperature,
        max_tokens,
        aso_lookup_url: or_default("ASO_LOOKUP_URL", "http://localhost:8085"),
        aso_lookup_api_key: optional("ASO_LOOKUP_API_KEY"),
        aso_platform,
        aso_pacing_ms: parse_u64("ASO_PACING_MS", "500")?,
        store_country: or_default("STORE_COUNTRY", "us").to_ascii_lowercase(),
        request_timeout_secs: parse_u64("ASOLENS_REQUEST_TIMEOUT_SECS", "30")?,
        user_agent: or_default("ASOLENS_USER_AGENT", "asolens/0.1 (keyword-research)"),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ASOLENS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
