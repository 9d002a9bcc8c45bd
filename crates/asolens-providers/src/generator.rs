use std::sync::Arc;

use async_trait::async_trait;

use asolens_core::{AppProfile, KeywordSet};

use crate::error::GenerationError;
use crate::selector::{ProviderOverrides, ProviderSelector};

/// Options for one generation call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    /// Provider name as supplied by the caller; `None` uses the default.
    pub provider: Option<String>,
    pub overrides: ProviderOverrides,
}

impl GenerationRequest {
    #[must_use]
    pub fn with_provider(provider: Option<&str>) -> Self {
        Self {
            provider: provider.map(str::to_owned),
            overrides: ProviderOverrides::default(),
        }
    }
}

/// Keyword generation as seen by the analysis pipeline.
#[async_trait]
pub trait GenerateKeywords: Send + Sync {
    async fn generate(
        &self,
        profile: &AppProfile,
        request: &GenerationRequest,
    ) -> Result<KeywordSet, GenerationError>;
}

/// Resolves, validates, and builds a provider per call, then runs it.
pub struct KeywordGenerator {
    selector: Arc<ProviderSelector>,
}

impl KeywordGenerator {
    pub fn new(selector: Arc<ProviderSelector>) -> Self {
        Self { selector }
    }
}

#[async_trait]
impl GenerateKeywords for KeywordGenerator {
    async fn generate(
        &self,
        profile: &AppProfile,
        request: &GenerationRequest,
    ) -> Result<KeywordSet, GenerationError> {
        let id = self.selector.resolve(request.provider.as_deref())?;
        let provider = self.selector.build(id, &request.overrides)?;

        tracing::info!(
            provider = %id,
            model = %provider.config().model,
            app = %profile.title,
            "Using {} AI provider",
            id.as_str().to_ascii_uppercase()
        );

        let keywords = provider.generate_keywords(profile).await?;
        Ok(keywords)
    }
}
