//! HTTP client for the public iTunes lookup API and App Store product pages.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use asolens_core::{AppProfile, SimilarApp};

use crate::error::CatalogError;
use crate::similar::extract_linked_app_ids;
use crate::types::LookupResponse;
use crate::StoreCatalog;

const DEFAULT_LOOKUP_BASE_URL: &str = "https://itunes.apple.com/";
const DEFAULT_WEB_BASE_URL: &str = "https://apps.apple.com/";

/// Upper bound on ids resolved from one product page.
const MAX_SIMILAR_IDS: usize = 20;

/// Store catalog backed by the iTunes lookup API.
///
/// App profiles come from `lookup?id=`. Similar apps are the app links found
/// on the product page, resolved to titles with a single batched lookup.
pub struct ItunesCatalog {
    client: Client,
    lookup_base: Url,
    web_base: Url,
    country: String,
}

impl ItunesCatalog {
    /// Creates a catalog pointed at the production Apple endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, country: &str) -> Result<Self, CatalogError> {
        Self::with_base_urls(
            timeout_secs,
            user_agent,
            country,
            DEFAULT_LOOKUP_BASE_URL,
            DEFAULT_WEB_BASE_URL,
        )
    }

    /// Creates a catalog with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the client cannot be constructed, or
    /// [`CatalogError::InvalidBaseUrl`] if either base URL does not parse.
    pub fn with_base_urls(
        timeout_secs: u64,
        user_agent: &str,
        country: &str,
        lookup_base: &str,
        web_base: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            lookup_base: parse_base(lookup_base)?,
            web_base: parse_base(web_base)?,
            country: country.to_ascii_lowercase(),
        })
    }

    fn lookup_url(&self, ids: &[u64]) -> Url {
        let joined = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let mut url = self.lookup_base.clone();
        url.set_path(&format!("{}lookup", self.lookup_base.path()));
        url.query_pairs_mut()
            .append_pair("id", &joined)
            .append_pair("country", &self.country)
            .append_pair("entity", "software");
        url
    }

    fn product_page_url(&self, id: u64) -> Url {
        let mut url = self.web_base.clone();
        url.set_path(&format!(
            "{}{}/app/id{id}",
            self.web_base.path(),
            self.country
        ));
        url
    }

    async fn lookup(&self, ids: &[u64]) -> Result<LookupResponse, CatalogError> {
        let url = self.lookup_url(ids);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str::<LookupResponse>(&body).map_err(|e| CatalogError::Deserialize {
            context: format!("lookup(id={})", url.query().unwrap_or_default()),
            source: e,
        })
    }
}

#[async_trait]
impl StoreCatalog for ItunesCatalog {
    async fn fetch_app(&self, id: u64) -> Result<AppProfile, CatalogError> {
        let response = self.lookup(&[id]).await?;
        let entry = response
            .results
            .into_iter()
            .find(|e| e.track_id == id)
            .ok_or(CatalogError::NotFound { id })?;
        Ok(entry.into_profile())
    }

    async fn fetch_similar(&self, id: u64) -> Result<Vec<SimilarApp>, CatalogError> {
        let url = self.product_page_url(id);
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { id });
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let html = response.text().await?;

        let mut ids = extract_linked_app_ids(&html, id);
        ids.truncate(MAX_SIMILAR_IDS);
        if ids.is_empty() {
            tracing::debug!(app_id = id, "product page lists no similar apps");
            return Ok(Vec::new());
        }

        let resolved = self.lookup(&ids).await?;
        // Keep the page order; the lookup API does not guarantee it.
        let similar = ids
            .iter()
            .filter_map(|sid| {
                resolved
                    .results
                    .iter()
                    .find(|e| e.track_id == *sid)
                    .map(|e| SimilarApp {
                        id: e.track_id,
                        title: e.track_name.clone(),
                    })
            })
            .collect();
        Ok(similar)
    }
}

/// Parses a base URL, normalising it to end with exactly one slash.
fn parse_base(raw: &str) -> Result<Url, CatalogError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}
