use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Identifier of a keyword-generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
    Claude,
}

impl ProviderId {
    /// Used when neither the caller nor the environment picks a provider.
    pub const DEFAULT: ProviderId = ProviderId::Gemini;

    pub const ALL: [ProviderId; 2] = [ProviderId::Gemini, ProviderId::Claude];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::Claude => "claude",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderId::Gemini => "Gemini 2.5 Pro",
            ProviderId::Claude => "Claude Sonnet 4",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            ProviderId::Gemini => "Cost-effective, fast analysis",
            ProviderId::Claude => "Premium quality analysis",
        }
    }

    /// Environment variable holding this provider's credential.
    #[must_use]
    pub fn credential_var(self) -> &'static str {
        match self {
            ProviderId::Gemini => "GEMINI_API_KEY",
            ProviderId::Claude => "ANTHROPIC_API_KEY",
        }
    }

    /// Human label used in log lines and error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProviderId::Gemini => "Gemini",
            ProviderId::Claude => "Claude",
        }
    }

    fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderId::Gemini),
            "claude" => Ok(ProviderId::Claude),
            _ => Err(ConfigError::UnknownProvider {
                name: s.to_owned(),
                supported: Self::supported_list(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_ids_ignoring_case() {
        assert_eq!("Gemini".parse::<ProviderId>().unwrap(), ProviderId::Gemini);
        assert_eq!(" CLAUDE ".parse::<ProviderId>().unwrap(), ProviderId::Claude);
    }

    #[test]
    fn unknown_id_lists_supported_providers() {
        let err = "openai".parse::<ProviderId>().unwrap_err();
        assert!(
            matches!(err, ConfigError::UnknownProvider { ref name, ref supported }
                if name == "openai" && supported == "gemini, claude"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn default_is_gemini() {
        assert_eq!(ProviderId::DEFAULT, ProviderId::Gemini);
    }
}
