use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use asolens_core::{KeywordScore, Platform, Recommendation};

use crate::lookup::KeywordLookup;
use crate::policy::{classify_level, opportunity_order, recommend, scale_score};

/// Inter-lookup delay for batch scoring.
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Count of scored keywords per recommendation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecommendationSummary {
    pub excellent: usize,
    pub good: usize,
    pub consider: usize,
    pub challenging: usize,
    pub avoid: usize,
    pub failed: usize,
}

impl RecommendationSummary {
    #[must_use]
    pub fn from_scores(scores: &[KeywordScore]) -> Self {
        let mut summary = Self::default();
        for score in scores {
            let slot = match score.recommendation {
                Recommendation::Excellent => &mut summary.excellent,
                Recommendation::Good => &mut summary.good,
                Recommendation::Consider => &mut summary.consider,
                Recommendation::Challenging => &mut summary.challenging,
                Recommendation::Avoid => &mut summary.avoid,
                Recommendation::AnalysisFailed => &mut summary.failed,
            };
            *slot += 1;
        }
        summary
    }
}

/// Best keywords out of a batch, with totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityReport {
    pub platform: Platform,
    pub total_analyzed: usize,
    pub top_opportunities: Vec<KeywordScore>,
    pub summary: RecommendationSummary,
}

/// Scores keywords against one platform.
pub struct AsoScorer {
    lookup: Arc<dyn KeywordLookup>,
    platform: Platform,
    pacing: Duration,
}

impl AsoScorer {
    pub fn new(lookup: Arc<dyn KeywordLookup>, platform: Platform) -> Self {
        Self {
            lookup,
            platform,
            pacing: DEFAULT_PACING,
        }
    }

    /// Replaces the delay inserted between batch lookups.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Scores one keyword. Lookup failures produce a degraded
    /// `analysis_failed` score instead of an error.
    pub async fn score(&self, keyword: &str) -> KeywordScore {
        tracing::debug!(keyword, platform = %self.platform, "scoring keyword");

        match self.lookup.lookup(keyword, self.platform).await {
            Ok(raw) => {
                let traffic = scale_score(raw.traffic.score);
                let difficulty = scale_score(raw.difficulty.score);
                KeywordScore {
                    keyword: keyword.to_owned(),
                    platform: self.platform,
                    traffic_score: traffic,
                    difficulty_score: difficulty,
                    competition_level: classify_level(difficulty),
                    traffic_level: classify_level(traffic),
                    recommendation: recommend(traffic, difficulty),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(keyword, platform = %self.platform, error = %e, "keyword lookup failed");
                KeywordScore::failed(keyword, self.platform, e.to_string())
            }
        }
    }

    /// Scores `keywords` one at a time, in order, pausing between lookups.
    pub async fn score_batch(&self, keywords: &[String]) -> Vec<KeywordScore> {
        tracing::info!(
            count = keywords.len(),
            platform = %self.platform,
            "scoring keyword batch"
        );

        let mut scores = Vec::with_capacity(keywords.len());
        for (i, keyword) in keywords.iter().enumerate() {
            if i > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
            scores.push(self.score(keyword).await);
        }

        let failed = scores.iter().filter(|s| s.is_failed()).count();
        if failed > 0 {
            tracing::warn!(failed, total = scores.len(), "some keyword lookups failed");
        }
        scores
    }

    /// Scores every keyword and returns the best `top_n` with a summary.
    pub async fn rank_opportunities(&self, keywords: &[String], top_n: usize) -> OpportunityReport {
        let mut scores = self.score_batch(keywords).await;
        let summary = RecommendationSummary::from_scores(&scores);
        let total_analyzed = scores.len();

        scores.sort_by(opportunity_order);
        scores.truncate(top_n);

        OpportunityReport {
            platform: self.platform,
            total_analyzed,
            top_opportunities: scores,
            summary,
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
