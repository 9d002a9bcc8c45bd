//! Google Gemini `generateContent` backend.

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
    base_prompt, keyword_tool_schema, keywords_from_arguments, keywords_from_text,
    KEYWORD_TOOL_DESCRIPTION, KEYWORD_TOOL_NAME,
};
use crate::provider::KeywordProvider;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const LABEL: &str = "Gemini";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
    tool_config: ToolConfig,
    generation_config: GenerationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

/// One part of a content turn; exactly one field is set.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: &'static str,
    description: &'static str,
    parameters: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    function_calling_config: FunctionCallingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionCallingConfig {
    mode: &'static str,
    allowed_function_names: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: i64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

/// Keyword provider backed by Gemini function calling.
///
/// If the model answers in prose instead of calling the function, a
/// bracketed list in the text is accepted as a fallback.
pub struct GeminiProvider {
    client: Client,
    endpoint: Url,
    api_key: String,
    config: ProviderConfig,
    images: Arc<dyn ImageFetcher>,
}

impl GeminiProvider {
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
    /// As [`GeminiProvider::new`], plus [`ProviderError::InvalidBaseUrl`].
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

        let root = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&root)
            .and_then(|base| {
                base.join(&format!(
                    "v1beta/models/{}:generateContent",
                    config.model
                ))
            })
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

    async fn process_images(&self, urls: &[String]) -> Vec<Part> {
        encode_images(self.images.as_ref(), urls, "gemini")
            .await
            .into_iter()
            .map(|image| Part {
                inline_data: Some(Blob {
                    mime_type: image.media_type.as_mime().to_owned(),
                    data: image.data,
                }),
                ..Part::default()
            })
            .collect()
    }

    fn build_request(&self, prompt: String, images: Vec<Part>) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(images.len() + 1);
        parts.push(Part {
            text: Some(prompt),
            ..Part::default()
        });
        parts.extend(images);

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_owned(),
                parts,
            }],
            tools: vec![Tool {
                function_declarations: vec![FunctionDeclaration {
                    name: KEYWORD_TOOL_NAME,
                    description: KEYWORD_TOOL_DESCRIPTION,
                    parameters: keyword_tool_schema(),
                }],
            }],
            tool_config: ToolConfig {
                function_calling_config: FunctionCallingConfig {
                    mode: "ANY",
                    allowed_function_names: vec![KEYWORD_TOOL_NAME],
                },
            },
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        }
    }

    fn parse_response(response: &GenerateContentResponse) -> Result<KeywordSet, ProviderError> {
        let parts = response
            .candidates
            .first()
            .map(|c| c.content.parts.as_slice())
            .unwrap_or_default();

        let from_call = parts
            .iter()
            .filter_map(|p| p.function_call.as_ref())
            .find(|call| call.name == KEYWORD_TOOL_NAME)
            .and_then(|call| keywords_from_arguments(&call.args));

        let keywords = from_call.or_else(|| {
            let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
            let recovered = keywords_from_text(&text);
            if recovered.is_some() {
                tracing::debug!(provider = "gemini", "keywords recovered from text response");
            }
            recovered
        });

        keywords
            .and_then(KeywordSet::new)
            .ok_or(ProviderError::NoStructuredCall { provider: LABEL })
    }
}

#[async_trait]
impl KeywordProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn format_prompt(&self, profile: &AppProfile) -> String {
        format!(
            "{}\n\nPlease use the {KEYWORD_TOOL_NAME} function to return your response with the identified keywords in a structured format.",
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
            provider = "gemini",
            model = %self.config.model,
            images = image_count,
            "sending keyword generation request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
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

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|source| ProviderError::Deserialize {
                provider: LABEL,
                context: "generateContent response".to_owned(),
                source,
            })?;
        let keywords = Self::parse_response(&parsed)?;

        tracing::info!(
            provider = "gemini",
            count = keywords.keywords().len(),
            "keywords generated"
        );
        Ok(keywords)
    }
}
