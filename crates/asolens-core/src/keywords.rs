use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Store metadata for one app, as used for keyword generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppProfile {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Screenshot image URLs in store display order.
    #[serde(default)]
    pub screenshots: Vec<String>,
}

/// An entry in an app's "similar apps" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarApp {
    pub id: u64,
    pub title: String,
}

/// Keywords produced by a generation provider.
///
/// Never empty: construction fails for an empty list so that a provider
/// cannot report success without at least one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Wraps `keywords`, preserving order and duplicates.
    ///
    /// Returns `None` when `keywords` is empty.
    #[must_use]
    pub fn new(keywords: Vec<String>) -> Option<Self> {
        if keywords.is_empty() {
            None
        } else {
            Some(Self { keywords })
        }
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn into_keywords(self) -> Vec<String> {
        self.keywords
    }
}

/// Store platform a keyword is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Itunes,
    Gplay,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Itunes => "itunes",
            Platform::Gplay => "gplay",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "itunes" => Ok(Platform::Itunes),
            "gplay" => Ok(Platform::Gplay),
            other => Err(format!("unknown platform '{other}' (expected itunes or gplay)")),
        }
    }
}

/// Five-step bucket used for both traffic and competition levels.
///
/// `Unknown` only appears on scores whose lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Unknown,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Level {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Unknown => "unknown",
            Level::VeryLow => "very_low",
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
            Level::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actionable verdict for a scored keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Excellent,
    Good,
    Consider,
    Challenging,
    Avoid,
    AnalysisFailed,
}

impl Recommendation {
    /// Sort rank, higher is better: excellent=5 down to `analysis_failed`=0.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Recommendation::Excellent => 5,
            Recommendation::Good => 4,
            Recommendation::Consider => 3,
            Recommendation::Challenging => 2,
            Recommendation::Avoid => 1,
            Recommendation::AnalysisFailed => 0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::Excellent => "excellent",
            Recommendation::Good => "good",
            Recommendation::Consider => "consider",
            Recommendation::Challenging => "challenging",
            Recommendation::Avoid => "avoid",
            Recommendation::AnalysisFailed => "analysis_failed",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traffic/difficulty assessment for one keyword on the 0–100 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordScore {
    pub keyword: String,
    pub platform: Platform,
    pub traffic_score: u8,
    pub difficulty_score: u8,
    pub competition_level: Level,
    pub traffic_level: Level,
    pub recommendation: Recommendation,
    /// Lookup failure reason; only set when `recommendation` is `analysis_failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KeywordScore {
    /// Degraded score for a keyword whose lookup failed.
    #[must_use]
    pub fn failed(keyword: &str, platform: Platform, reason: impl Into<String>) -> Self {
        Self {
            keyword: keyword.to_owned(),
            platform,
            traffic_score: 0,
            difficulty_score: 0,
            competition_level: Level::Unknown,
            traffic_level: Level::Unknown,
            recommendation: Recommendation::AnalysisFailed,
            error: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.recommendation == Recommendation::AnalysisFailed
    }
}

/// Pipeline step at which a similar app was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipStage {
    FetchSimilarApp,
    GenerateSimilarKeywords,
}

impl SkipStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkipStage::FetchSimilarApp => "fetch_similar_app",
            SkipStage::GenerateSimilarKeywords => "generate_similar_keywords",
        }
    }
}

impl fmt::Display for SkipStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A similar app whose fetch or keyword generation failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub stage: SkipStage,
    pub item: String,
    pub reason: String,
}

/// Everything produced by one app analysis request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub app_data: AppProfile,
    pub similar_apps: Vec<AppProfile>,
    pub main_app_keywords: Vec<String>,
    pub similar_app_keywords: Vec<String>,
    /// Main app keywords followed by similar-app keywords; duplicates kept.
    pub all_keywords: Vec<String>,
    pub keyword_analysis: Vec<KeywordScore>,
    /// Similar apps dropped along the way, in the order they failed.
    pub skipped: Vec<SkippedItem>,
}
