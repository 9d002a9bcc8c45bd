//! Shared domain types and configuration for the ASO keyword pipeline.

pub mod app_config;
pub mod config;
pub mod keywords;
pub mod provider_id;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::{
    AnalysisResult, AppProfile, KeywordScore, KeywordSet, Level, Platform, Recommendation,
    SimilarApp, SkipStage, SkippedItem,
};
pub use provider_id::ProviderId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unsupported AI provider: {name}. Supported providers: {supported}")]
    UnknownProvider { name: String, supported: String },

    #[error("{var} environment variable is required for {provider} provider")]
    MissingCredential {
        provider: &'static str,
        var: &'static str,
    },
}
