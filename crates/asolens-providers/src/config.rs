use asolens_core::ProviderId;

pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: i64 = 2000;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";

const TEMPERATURE_RANGE: (f32, f32) = (0.0, 2.0);
const MAX_TOKENS_RANGE: (i64, i64) = (1, 100_000);

/// Effective generation settings for one provider instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: i64,
}

impl ProviderConfig {
    /// Built-in defaults for `provider`.
    #[must_use]
    pub fn defaults_for(provider: ProviderId) -> Self {
        let model = match provider {
            ProviderId::Gemini => DEFAULT_GEMINI_MODEL,
            ProviderId::Claude => DEFAULT_CLAUDE_MODEL,
        };
        Self {
            model: model.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Returns a message for each setting outside its recommended range.
    ///
    /// Out-of-range values are still used; callers only log these.
    #[must_use]
    pub fn soft_bound_warnings(&self, provider: ProviderId) -> Vec<String> {
        let mut warnings = Vec::new();
        let label = provider.label();

        if !(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&self.temperature) {
            warnings.push(format!(
                "{label} temperature {} is outside recommended range (0-2). Using anyway.",
                self.temperature
            ));
        }

        if !(MAX_TOKENS_RANGE.0..=MAX_TOKENS_RANGE.1).contains(&self.max_tokens) {
            warnings.push(format!(
                "{label} maxTokens {} is outside recommended range (1-100000). Using anyway.",
                self.max_tokens
            ));
        }

        if !self.model.to_ascii_lowercase().contains(provider.as_str()) {
            warnings.push(format!(
                "Model name \"{}\" doesn't appear to be a {label} model.",
                self.model
            ));
        }

        warnings
    }
}
