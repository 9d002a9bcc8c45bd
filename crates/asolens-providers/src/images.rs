//! Screenshot download and base64 encoding shared by the providers.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;

use crate::error::ImageFetchError;
use crate::media::{classify_media_type, MediaType};

/// Raw bytes of one downloaded image.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// An image ready to embed in a provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub media_type: MediaType,
    /// Standard base64 of the image bytes.
    pub data: String,
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageFetchError>;
}

/// [`ImageFetcher`] over plain HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the client cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageFetchError> {
        let http_err = |source| ImageFetchError::Http {
            url: url.to_owned(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageFetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await.map_err(http_err)?.to_vec();

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}

/// Downloads and encodes every screenshot in `urls`, in order.
///
/// Failed downloads are logged and skipped, so the result may be shorter
/// than `urls` (or empty). Generation proceeds with whatever succeeded.
pub async fn encode_images(
    fetcher: &dyn ImageFetcher,
    urls: &[String],
    provider: &str,
) -> Vec<EncodedImage> {
    let mut attempts = Vec::with_capacity(urls.len());
    for url in urls {
        let result = fetcher.fetch(url).await.map(|image| EncodedImage {
            media_type: classify_media_type(image.content_type.as_deref(), url),
            data: STANDARD.encode(&image.bytes),
        });
        attempts.push((url.as_str(), result));
    }

    let mut encoded = Vec::with_capacity(attempts.len());
    for (url, result) in attempts {
        match result {
            Ok(image) => encoded.push(image),
            Err(e) => {
                tracing::warn!(provider, url, error = %e, "skipping screenshot that failed to load");
            }
        }
    }

    tracing::debug!(
        provider,
        requested = urls.len(),
        encoded = encoded.len(),
        "screenshots prepared"
    );
    encoded
}
