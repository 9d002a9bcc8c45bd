//! Response types for the public iTunes `lookup` endpoint.
//!
//! Only the fields the pipeline reads are modelled. `screenshotUrls` is empty
//! for iPad-only apps, which is why `ipadScreenshotUrls` is kept as a fallback.

use serde::Deserialize;

use asolens_core::AppProfile;

/// Top-level response from `GET /lookup`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    #[serde(default)]
    pub results: Vec<LookupEntry>,
}

/// A single software entry from a lookup response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntry {
    pub track_id: u64,
    pub track_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub screenshot_urls: Vec<String>,
    #[serde(default)]
    pub ipad_screenshot_urls: Vec<String>,
}

impl LookupEntry {
    #[must_use]
    pub fn into_profile(self) -> AppProfile {
        let screenshots = if self.screenshot_urls.is_empty() {
            self.ipad_screenshot_urls
        } else {
            self.screenshot_urls
        };
        AppProfile {
            title: self.track_name,
            description: self.description,
            genres: self.genres,
            screenshots,
        }
    }
}
