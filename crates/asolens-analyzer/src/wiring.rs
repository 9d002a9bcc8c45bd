use std::sync::Arc;
use std::time::Duration;

use asolens_catalog::ItunesCatalog;
use asolens_core::AppConfig;
use asolens_providers::{HttpImageFetcher, KeywordGenerator, ProviderSelector, ProviderSettings};
use asolens_scoring::{AsoLookupClient, AsoScorer};

use crate::analyzer::Analyzer;
use crate::error::SetupError;

/// Production collaborators built from the process configuration.
pub struct Services {
    pub analyzer: Arc<Analyzer>,
    pub providers: Arc<ProviderSelector>,
}

impl Services {
    /// # Errors
    ///
    /// Returns [`SetupError`] if any HTTP client cannot be constructed or a
    /// configured base URL is invalid.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, SetupError> {
        let timeout = config.request_timeout_secs;

        let catalog = ItunesCatalog::new(timeout, &config.user_agent, &config.store_country)?;
        let images = HttpImageFetcher::new(timeout, &config.user_agent)?;
        let providers = Arc::new(ProviderSelector::new(
            ProviderSettings::from_app_config(config),
            Arc::new(images),
        ));
        let lookup = AsoLookupClient::new(
            &config.aso_lookup_url,
            config.aso_lookup_api_key.clone(),
            timeout,
            &config.user_agent,
        )?;
        let scorer = AsoScorer::new(Arc::new(lookup), config.aso_platform)
            .with_pacing(Duration::from_millis(config.aso_pacing_ms));

        let analyzer = Analyzer::new(
            Arc::new(catalog),
            Arc::new(KeywordGenerator::new(Arc::clone(&providers))),
            Arc::new(scorer),
        );

        tracing::debug!(
            platform = %config.aso_platform,
            country = %config.store_country,
            "analysis services initialised"
        );

        Ok(Self {
            analyzer: Arc::new(analyzer),
            providers,
        })
    }
}
