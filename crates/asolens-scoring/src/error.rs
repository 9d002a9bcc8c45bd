use thiserror::Error;

/// Failure of one keyword lookup. Never escapes [`crate::AsoScorer::score`].
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lookup for '{keyword}' returned status {status}")]
    UnexpectedStatus { keyword: String, status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid lookup base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
