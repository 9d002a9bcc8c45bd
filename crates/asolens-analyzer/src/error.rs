use thiserror::Error;

use asolens_catalog::CatalogError;
use asolens_core::ConfigError;
use asolens_providers::{GenerationError, ProviderError};
use asolens_scoring::ScoringError;

/// Failure of an analysis request as a whole.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("store catalog error: {0}")]
    Catalog(#[source] CatalogError),
}

impl AnalysisError {
    /// Stable machine-readable code for front doors.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation_error",
            AnalysisError::NotFound(_) => "not_found",
            AnalysisError::Config(_) => "config_error",
            AnalysisError::Provider(_) => "provider_error",
            AnalysisError::Catalog(_) => "catalog_error",
        }
    }
}

impl From<CatalogError> for AnalysisError {
    fn from(e: CatalogError) -> Self {
        if e.is_not_found() {
            AnalysisError::NotFound(e.to_string())
        } else {
            AnalysisError::Catalog(e)
        }
    }
}

impl From<GenerationError> for AnalysisError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::Config(e) => AnalysisError::Config(e),
            GenerationError::Provider(e) => AnalysisError::Provider(e),
        }
    }
}

/// Failure to construct the production collaborators.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("store catalog setup failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("image fetcher setup failed: {0}")]
    Images(#[from] reqwest::Error),

    #[error("keyword lookup setup failed: {0}")]
    Lookup(#[from] ScoringError),
}
