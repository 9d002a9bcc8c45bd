//! Provider choice, credential validation, and construction.

use std::sync::Arc;

use serde::Serialize;

use asolens_core::{AppConfig, ConfigError, ProviderId};

use crate::claude::ClaudeProvider;
use crate::config::ProviderConfig;
use crate::error::GenerationError;
use crate::gemini::GeminiProvider;
use crate::images::ImageFetcher;
use crate::provider::KeywordProvider;

/// Environment-derived provider settings.
///
/// Model, temperature, and token limits are `None` when unset so that
/// built-in defaults apply beneath them.
#[derive(Clone, Default)]
pub struct ProviderSettings {
    pub default_provider: Option<ProviderId>,
    pub gemini_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub claude_model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i64>,
    pub request_timeout_secs: u64,
    /// API root overrides, used to point providers at a mock server.
    pub gemini_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("default_provider", &self.default_provider)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[redacted]"))
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("claude_model", &self.claude_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .finish()
    }
}

impl ProviderSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            default_provider: config.default_provider,
            gemini_api_key: config.gemini_api_key.clone(),
            anthropic_api_key: config.anthropic_api_key.clone(),
            gemini_model: config.gemini_model.clone(),
            claude_model: config.claude_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            request_timeout_secs: config.request_timeout_secs,
            gemini_base_url: None,
            anthropic_base_url: None,
        }
    }

    fn credential(&self, id: ProviderId) -> Option<&str> {
        let key = match id {
            ProviderId::Gemini => self.gemini_api_key.as_deref(),
            ProviderId::Claude => self.anthropic_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }

    fn model(&self, id: ProviderId) -> Option<&str> {
        match id {
            ProviderId::Gemini => self.gemini_model.as_deref(),
            ProviderId::Claude => self.claude_model.as_deref(),
        }
    }
}

/// Per-call settings that take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderOverrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i64>,
}

/// Availability of one provider, as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub id: ProviderId,
    pub name: &'static str,
    pub description: &'static str,
    pub available: bool,
    pub is_default: bool,
}

/// Chooses and constructs keyword providers.
pub struct ProviderSelector {
    settings: ProviderSettings,
    images: Arc<dyn ImageFetcher>,
}

impl ProviderSelector {
    pub fn new(settings: ProviderSettings, images: Arc<dyn ImageFetcher>) -> Self {
        Self { settings, images }
    }

    /// Picks the provider for one call: explicit choice, then the configured
    /// default, then [`ProviderId::DEFAULT`].
    ///
    /// A blank explicit choice counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProvider`] for an unrecognised explicit id.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<ProviderId, ConfigError> {
        match explicit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => name.parse(),
            None => Ok(self.settings.default_provider.unwrap_or(ProviderId::DEFAULT)),
        }
    }

    /// Checks that `id` has a usable credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] naming the variable to set.
    pub fn validate(&self, id: ProviderId) -> Result<(), ConfigError> {
        match self.settings.credential(id) {
            Some(_) => Ok(()),
            None => Err(ConfigError::MissingCredential {
                provider: id.label(),
                var: id.credential_var(),
            }),
        }
    }

    /// Effective settings for `id`: built-in defaults, then environment,
    /// then `overrides`.
    #[must_use]
    pub fn effective_config(&self, id: ProviderId, overrides: &ProviderOverrides) -> ProviderConfig {
        let defaults = ProviderConfig::defaults_for(id);
        ProviderConfig {
            model: overrides
                .model
                .clone()
                .or_else(|| self.settings.model(id).map(str::to_owned))
                .unwrap_or(defaults.model),
            temperature: overrides
                .temperature
                .or(self.settings.temperature)
                .unwrap_or(defaults.temperature),
            max_tokens: overrides
                .max_tokens
                .or(self.settings.max_tokens)
                .unwrap_or(defaults.max_tokens),
        }
    }

    /// Constructs a ready-to-use provider.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] when the credential is missing, or
    /// [`GenerationError::Provider`] if the HTTP client cannot be built.
    pub fn build(
        &self,
        id: ProviderId,
        overrides: &ProviderOverrides,
    ) -> Result<Box<dyn KeywordProvider>, GenerationError> {
        self.validate(id)?;
        let key = self.settings.credential(id).unwrap_or_default();
        let config = self.effective_config(id, overrides);

        for warning in config.soft_bound_warnings(id) {
            tracing::warn!(provider = %id, "{warning}");
        }
        tracing::info!(
            provider = %id,
            model = %config.model,
            temperature = config.temperature,
            max_tokens = config.max_tokens,
            "{} configuration resolved",
            id.label()
        );

        let timeout = self.settings.request_timeout_secs;
        let images = Arc::clone(&self.images);
        let provider: Box<dyn KeywordProvider> = match id {
            ProviderId::Gemini => Box::new(match &self.settings.gemini_base_url {
                Some(base) => GeminiProvider::with_base_url(key, config, images, timeout, base)?,
                None => GeminiProvider::new(key, config, images, timeout)?,
            }),
            ProviderId::Claude => Box::new(match &self.settings.anthropic_base_url {
                Some(base) => ClaudeProvider::with_base_url(key, config, images, timeout, base)?,
                None => ClaudeProvider::new(key, config, images, timeout)?,
            }),
        };
        Ok(provider)
    }

    /// Every known provider with its availability.
    #[must_use]
    pub fn statuses(&self) -> Vec<ProviderStatus> {
        let default = self.settings.default_provider.unwrap_or(ProviderId::DEFAULT);
        ProviderId::ALL
            .iter()
            .map(|&id| ProviderStatus {
                id,
                name: id.display_name(),
                description: id.description(),
                available: self.settings.credential(id).is_some(),
                is_default: id == default,
            })
            .collect()
    }

    /// Provider-related environment variables with credentials masked.
    #[must_use]
    pub fn environment_report(&self) -> Vec<(&'static str, String)> {
        fn set_or_unset(value: Option<&str>) -> String {
            if value.is_some_and(|v| !v.trim().is_empty()) {
                "[set]".to_owned()
            } else {
                "[not set]".to_owned()
            }
        }
        fn or_default(value: Option<String>) -> String {
            value.unwrap_or_else(|| "[default]".to_owned())
        }

        let s = &self.settings;
        vec![
            (
                "AI_PROVIDER",
                or_default(s.default_provider.map(|p| p.to_string())),
            ),
            ("GEMINI_API_KEY", set_or_unset(s.gemini_api_key.as_deref())),
            (
                "ANTHROPIC_API_KEY",
                set_or_unset(s.anthropic_api_key.as_deref()),
            ),
            ("AI_MODEL_GEMINI", or_default(s.gemini_model.clone())),
            ("AI_MODEL_CLAUDE", or_default(s.claude_model.clone())),
            (
                "AI_TEMPERATURE",
                or_default(s.temperature.map(|t| t.to_string())),
            ),
            (
                "AI_MAX_TOKENS",
                or_default(s.max_tokens.map(|t| t.to_string())),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::ImageFetchError;
    use crate::images::FetchedImage;

    struct NoImages;

    #[async_trait]
    impl ImageFetcher for NoImages {
        async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageFetchError> {
            Err(ImageFetchError::Status {
                url: url.to_owned(),
                status: 404,
            })
        }
    }

    fn selector(settings: ProviderSettings) -> ProviderSelector {
        ProviderSelector::new(
            ProviderSettings {
                request_timeout_secs: 5,
                ..settings
            },
            Arc::new(NoImages),
        )
    }

    #[test]
    fn resolve_prefers_explicit_then_env_then_default() {
        let s = selector(ProviderSettings {
            default_provider: Some(ProviderId::Claude),
            ..ProviderSettings::default()
        });
        assert_eq!(s.resolve(Some("gemini")).unwrap(), ProviderId::Gemini);
        assert_eq!(s.resolve(None).unwrap(), ProviderId::Claude);
        assert_eq!(s.resolve(Some("  ")).unwrap(), ProviderId::Claude);

        let bare = selector(ProviderSettings::default());
        assert_eq!(bare.resolve(None).unwrap(), ProviderId::Gemini);
    }

    #[test]
    fn resolve_rejects_unknown_name() {
        let err = selector(ProviderSettings::default())
            .resolve(Some("openai"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProvider { .. }));
        assert!(err.to_string().contains("gemini, claude"));
    }

    #[test]
    fn default_resolves_even_when_it_cannot_validate() {
        let s = selector(ProviderSettings::default());
        let id = s.resolve(None).unwrap();
        let err = s.validate(id).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GEMINI_API_KEY environment variable is required for Gemini provider"
        );
    }

    #[test]
    fn blank_credential_does_not_validate() {
        let s = selector(ProviderSettings {
            anthropic_api_key: Some("   ".into()),
            ..ProviderSettings::default()
        });
        assert!(matches!(
            s.validate(ProviderId::Claude),
            Err(ConfigError::MissingCredential { var: "ANTHROPIC_API_KEY", .. })
        ));
    }

    #[test]
    fn effective_config_layers_overrides_over_env_over_defaults() {
        let s = selector(ProviderSettings {
            claude_model: Some("claude-env".into()),
            temperature: Some(0.9),
            ..ProviderSettings::default()
        });

        let from_env = s.effective_config(ProviderId::Claude, &ProviderOverrides::default());
        assert_eq!(from_env.model, "claude-env");
        assert!((from_env.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(from_env.max_tokens, 2000);

        let overridden = s.effective_config(
            ProviderId::Claude,
            &ProviderOverrides {
                model: Some("claude-call".into()),
                temperature: None,
                max_tokens: Some(512),
            },
        );
        assert_eq!(overridden.model, "claude-call");
        assert!((overridden.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(overridden.max_tokens, 512);

        // Gemini does not see the Claude model.
        assert_eq!(
            s.effective_config(ProviderId::Gemini, &ProviderOverrides::default())
                .model,
            "gemini-2.5-pro"
        );
    }

    #[test]
    fn out_of_range_max_tokens_pass_through_with_warning() {
        let s = selector(ProviderSettings {
            gemini_api_key: Some("g".into()),
            max_tokens: Some(250_000),
            ..ProviderSettings::default()
        });

        let from_env = s.effective_config(ProviderId::Gemini, &ProviderOverrides::default());
        assert_eq!(from_env.max_tokens, 250_000);
        assert!(from_env.soft_bound_warnings(ProviderId::Gemini)[0].contains("maxTokens 250000"));

        let negative = ProviderOverrides {
            max_tokens: Some(-5),
            ..ProviderOverrides::default()
        };
        let from_call = s.effective_config(ProviderId::Gemini, &negative);
        assert_eq!(from_call.max_tokens, -5);
        assert!(from_call.soft_bound_warnings(ProviderId::Gemini)[0].contains("maxTokens -5"));

        let provider = s.build(ProviderId::Gemini, &negative).expect("build despite warning");
        assert_eq!(provider.config().max_tokens, -5);
    }

    #[test]
    fn build_without_credential_is_config_error() {
        let result = selector(ProviderSettings::default())
            .build(ProviderId::Claude, &ProviderOverrides::default());
        assert!(matches!(
            result,
            Err(GenerationError::Config(ConfigError::MissingCredential { .. }))
        ));
    }

    #[test]
    fn build_returns_requested_provider() {
        let s = selector(ProviderSettings {
            gemini_api_key: Some("g".into()),
            anthropic_api_key: Some("a".into()),
            ..ProviderSettings::default()
        });
        for id in ProviderId::ALL {
            let provider = s.build(id, &ProviderOverrides::default()).expect("build");
            assert_eq!(provider.id(), id);
        }
    }

    #[test]
    fn statuses_report_availability_and_default() {
        let s = selector(ProviderSettings {
            anthropic_api_key: Some("a".into()),
            default_provider: Some(ProviderId::Claude),
            ..ProviderSettings::default()
        });
        let statuses = s.statuses();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].id, ProviderId::Gemini);
        assert!(!statuses[0].available);
        assert!(!statuses[0].is_default);
        assert!(statuses[1].available);
        assert!(statuses[1].is_default);
        assert_eq!(statuses[1].name, "Claude Sonnet 4");
    }

    #[test]
    fn environment_report_masks_credentials() {
        let s = selector(ProviderSettings {
            gemini_api_key: Some("super-secret".into()),
            max_tokens: Some(4096),
            ..ProviderSettings::default()
        });
        let report = s.environment_report();
        assert!(report.iter().all(|(_, v)| !v.contains("super-secret")));
        assert!(report.contains(&("GEMINI_API_KEY", "[set]".to_owned())));
        assert!(report.contains(&("ANTHROPIC_API_KEY", "[not set]".to_owned())));
        assert!(report.contains(&("AI_MAX_TOKENS", "4096".to_owned())));
        assert!(report.contains(&("AI_PROVIDER", "[default]".to_owned())));
    }
}
