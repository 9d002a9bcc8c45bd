use async_trait::async_trait;

use asolens_core::{AppProfile, KeywordSet, ProviderId};

use crate::config::ProviderConfig;
use crate::error::ProviderError;

/// A generative-AI backend that turns an app profile into search keywords.
///
/// Implementations embed the profile's screenshots alongside the prompt and
/// force a call to the shared keyword tool, so that output arrives as a list
/// rather than prose.
#[async_trait]
pub trait KeywordProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn config(&self) -> &ProviderConfig;

    /// Full instruction text sent to this backend for `profile`.
    fn format_prompt(&self, profile: &AppProfile) -> String;

    /// Makes one generation call.
    ///
    /// Screenshot download failures are skipped; any other failure,
    /// including a response with no extractable keywords, is an error.
    async fn generate_keywords(&self, profile: &AppProfile) -> Result<KeywordSet, ProviderError>;
}
