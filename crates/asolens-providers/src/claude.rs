//! Anthropic Messages API backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use asolens_core::{AppProfile, KeywordSet, ProviderId};

use crate::config::ProviderConfig;
use crate::error::{api_error_message, ProviderError};
use crate::images::{encode_images, ImageFetcher};
use crate::prompt::{
    base_prompt, keyword_tool_schema, keywords_from_arguments, KEYWORD_TOOL_DESCRIPTION,
    KEYWORD_TOOL_NAME,
};
use crate::provider::KeywordProvider;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const LABEL: &str = "Claude";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: i64,
    temperature: f32,
    messages: Vec<Message>,
    tools: Vec<ToolDefinition>,
    tool_choice: ToolChoice,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
struct ToolDefinition {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    ToolUse {
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

/// Keyword provider backed by Claude tool use.
pub struct ClaudeProvider {
    client: Client,
    endpoint: Url,
    api_key: String,
    config: ProviderConfig,
    images: Arc<dyn ImageFetcher>,
}

impl ClaudeProvider {
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingCredential`] for a blank key, or
    /// [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(
        api_key: &str,
        config: ProviderConfig,
        images: Arc<dyn ImageFetcher>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, config, images, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a provider against a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// As [`ClaudeProvider::new`], plus [`ProviderError::InvalidBaseUrl`].
    pub fn with_base_url(
        api_key: &str,
        config: ProviderConfig,
        images: Arc<dyn ImageFetcher>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential { provider: LABEL });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|source| ProviderError::Http {
                provider: LABEL,
                source,
            })?;

        let endpoint = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .and_then(|base| base.join("v1/messages"))
            .map_err(|e| ProviderError::InvalidBaseUrl {
                provider: LABEL,
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
            config,
            images,
        })
    }

    async fn process_images(&self, urls: &[String]) -> Vec<ContentBlock> {
        encode_images(self.images.as_ref(), urls, "claude")
            .await
            .into_iter()
            .map(|image| ContentBlock::Image {
                source: ImageSource {
                    kind: "base64",
                    media_type: image.media_type.as_mime(),
                    data: image.data,
                },
            })
            .collect()
    }

    fn build_request(&self, prompt: String, images: Vec<ContentBlock>) -> MessagesRequest<'_> {
        let mut content = Vec::with_capacity(images.len() + 1);
        content.push(ContentBlock::Text { text: prompt });
        content.extend(images);

        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user",
                content,
            }],
            tools: vec![ToolDefinition {
                name: KEYWORD_TOOL_NAME,
                description: KEYWORD_TOOL_DESCRIPTION,
                input_schema: keyword_tool_schema(),
            }],
            tool_choice: ToolChoice {
                kind: "tool",
                name: KEYWORD_TOOL_NAME,
            },
        }
    }

    fn parse_response(response: &MessagesResponse) -> Result<KeywordSet, ProviderError> {
        response
            .content
            .iter()
            .find_map(|block| match block {
                ResponseBlock::ToolUse { name, input } if name == KEYWORD_TOOL_NAME => {
                    keywords_from_arguments(input)
                }
                _ => None,
            })
            .and_then(KeywordSet::new)
            .ok_or(ProviderError::NoStructuredCall { provider: LABEL })
    }
}

#[async_trait]
impl KeywordProvider for ClaudeProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn format_prompt(&self, profile: &AppProfile) -> String {
        format!(
            "{}\n\nUse the {KEYWORD_TOOL_NAME} function to return your response with the identified keywords.",
            base_prompt(profile)
        )
    }

    async fn generate_keywords(&self, profile: &AppProfile) -> Result<KeywordSet, ProviderError> {
        let http_err = |source| ProviderError::Http {
            provider: LABEL,
            source,
        };

        let prompt = self.format_prompt(profile);
        let images = self.process_images(&profile.screenshots).await;
        let image_count = images.len();
        let body = self.build_request(prompt, images);

        tracing::debug!(
            provider = "claude",
            model = %self.config.model,
            images = image_count,
            "sending keyword generation request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        let text = response.text().await.map_err(http_err)?;
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: LABEL,
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&text).map_err(|source| ProviderError::Deserialize {
                provider: LABEL,
                context: "messages response".to_owned(),
                source,
            })?;
        let keywords = Self::parse_response(&parsed)?;

        tracing::info!(
            provider = "claude",
            count = keywords.keywords().len(),
            "keywords generated"
        );
        Ok(keywords)
    }
}
