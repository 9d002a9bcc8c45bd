//! Third-party keyword lookup: trait and HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use asolens_core::Platform;

use crate::error::ScoringError;

/// One upstream score on the 0–10 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ScoreComponent {
    #[serde(default)]
    pub score: f64,
}

/// Raw lookup result for one keyword. Missing components count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct LookupScores {
    #[serde(default)]
    pub traffic: ScoreComponent,
    #[serde(default)]
    pub difficulty: ScoreComponent,
}

#[async_trait]
pub trait KeywordLookup: Send + Sync {
    async fn lookup(&self, keyword: &str, platform: Platform)
        -> Result<LookupScores, ScoringError>;
}

/// HTTP client for the keyword lookup service.
#[derive(Debug, Clone)]
pub struct AsoLookupClient {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl AsoLookupClient {
    /// # Errors
    ///
    /// Returns [`ScoringError::Http`] if the client cannot be built, or
    /// [`ScoringError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let root = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&root)
            .and_then(|base| base.join("v1/keywords/analyze"))
            .map_err(|e| ScoringError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }
}

#[async_trait]
impl KeywordLookup for AsoLookupClient {
    async fn lookup(
        &self,
        keyword: &str,
        platform: Platform,
    ) -> Result<LookupScores, ScoringError> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("keyword", keyword), ("platform", platform.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::UnexpectedStatus {
                keyword: keyword.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<LookupScores>(&body).map_err(|e| ScoringError::Deserialize {
            context: format!("lookup(keyword={keyword})"),
            source: e,
        })
    }
}
