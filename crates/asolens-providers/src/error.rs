use serde::Deserialize;
use thiserror::Error;

use asolens_core::ConfigError;

/// Failure of a single generation call against an AI backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} AI error: HTTP error: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} AI error: API returned status {status}: {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{provider} AI error: JSON deserialization error for {context}: {source}")]
    Deserialize {
        provider: &'static str,
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} AI error: no valid function call or parseable keywords found in response")]
    NoStructuredCall { provider: &'static str },

    #[error("{provider} AI error: API key is required")]
    MissingCredential { provider: &'static str },

    #[error("{provider} AI error: invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        provider: &'static str,
        url: String,
        reason: String,
    },
}

/// Failure to download one screenshot.
#[derive(Debug, Error)]
pub enum ImageFetchError {
    #[error("failed to fetch image {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch image {url}: HTTP status {status}")]
    Status { url: String, status: u16 },
}

/// Uniform error of the keyword generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Extracts `error.message` from a backend error body, falling back to a
/// truncated copy of the raw body. Both backends use this envelope.
pub(crate) fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_reads_envelope() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert_eq!(api_error_message(body), "invalid x-api-key");
    }

    #[test]
    fn api_error_message_truncates_raw_body() {
        let body = "x".repeat(500);
        assert_eq!(api_error_message(&body).len(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn provider_errors_carry_backend_prefix() {
        let err = ProviderError::NoStructuredCall { provider: "Claude" };
        assert!(err.to_string().starts_with("Claude AI error:"));
    }
}
