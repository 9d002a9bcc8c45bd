use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use asolens_catalog::StoreCatalog;
use asolens_core::{AnalysisResult, KeywordScore, KeywordSet, SkipStage};
use asolens_providers::{GenerateKeywords, GenerationRequest};
use asolens_scoring::{AsoScorer, OpportunityReport};

use crate::error::AnalysisError;
use crate::input::{normalize_keywords, parse_app_id};
use crate::partition::partition_results;
use crate::sampling::sample_keywords;

/// Keywords scored per app analysis.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;
/// Similar apps considered per app analysis.
pub const DEFAULT_SIMILAR_LIMIT: usize = 3;

/// Runs the app analysis pipeline over injected collaborators.
///
/// Stages run strictly in sequence and per-item work runs one item at a
/// time. Only the target app's fetch and keyword generation are fatal;
/// similar-app and per-keyword failures degrade the result instead.
pub struct Analyzer {
    catalog: Arc<dyn StoreCatalog>,
    generator: Arc<dyn GenerateKeywords>,
    scorer: Arc<AsoScorer>,
}

impl Analyzer {
    pub fn new(
        catalog: Arc<dyn StoreCatalog>,
        generator: Arc<dyn GenerateKeywords>,
        scorer: Arc<AsoScorer>,
    ) -> Self {
        Self {
            catalog,
            generator,
            scorer,
        }
    }

    /// Analyzes one app with a freshly seeded random sample.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze_with_rng`].
    pub async fn analyze(
        &self,
        app_id: &str,
        request: &GenerationRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        self.analyze_with_rng(app_id, request, &mut rng).await
    }

    /// Analyzes one app, drawing the scored sample from `rng`.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Validation`] for a malformed id, before any network call
    /// - [`AnalysisError::NotFound`] / [`AnalysisError::Catalog`] if the target
    ///   app cannot be fetched
    /// - [`AnalysisError::Config`] / [`AnalysisError::Provider`] if keyword
    ///   generation for the target app fails
    pub async fn analyze_with_rng<R: Rng + Send + ?Sized>(
        &self,
        app_id: &str,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<AnalysisResult, AnalysisError> {
        let id = parse_app_id(app_id)?;
        tracing::info!(
            app_id = id,
            provider = request.provider.as_deref().unwrap_or("default"),
            "starting app analysis"
        );

        // Fetch
        let app_data = self.catalog.fetch_app(id).await?;
        let similar_entries = match self.catalog.fetch_similar(id).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(app_id = id, error = %e, "similar apps unavailable; continuing without them");
                Vec::new()
            }
        };

        let mut fetches = Vec::new();
        for entry in similar_entries.iter().take(DEFAULT_SIMILAR_LIMIT) {
            let label = format!("{} ({})", entry.title, entry.id);
            fetches.push((label, self.catalog.fetch_app(entry.id).await));
        }
        let (similar_apps, mut skipped) = partition_results(SkipStage::FetchSimilarApp, fetches);

        // Generate
        let main_app_keywords = self
            .generator
            .generate(&app_data, request)
            .await?
            .into_keywords();

        let mut generations = Vec::new();
        for profile in &similar_apps {
            let result = self.generator.generate(profile, request).await;
            generations.push((profile.title.clone(), result));
        }
        let (similar_sets, generation_skips) =
            partition_results(SkipStage::GenerateSimilarKeywords, generations);
        skipped.extend(generation_skips);
        let similar_app_keywords: Vec<String> = similar_sets
            .into_iter()
            .flat_map(KeywordSet::into_keywords)
            .collect();

        let all_keywords: Vec<String> = main_app_keywords
            .iter()
            .chain(&similar_app_keywords)
            .cloned()
            .collect();

        // Sample & score
        let sample = sample_keywords(&all_keywords, DEFAULT_SAMPLE_SIZE, rng);
        let keyword_analysis = self.scorer.score_batch(&sample).await;

        tracing::info!(
            app_id = id,
            similar_apps = similar_apps.len(),
            keywords = all_keywords.len(),
            scored = keyword_analysis.len(),
            skipped = skipped.len(),
            "app analysis complete"
        );

        Ok(AnalysisResult {
            app_data,
            similar_apps,
            main_app_keywords,
            similar_app_keywords,
            all_keywords,
            keyword_analysis,
            skipped,
        })
    }

    /// Scores a caller-supplied keyword list directly, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Validation`] unless 1 to 20 non-blank
    /// keywords are given.
    pub async fn score_keywords<S: AsRef<str> + Sync>(
        &self,
        keywords: &[S],
    ) -> Result<Vec<KeywordScore>, AnalysisError> {
        let cleaned = normalize_keywords(keywords)?;
        Ok(self.scorer.score_batch(&cleaned).await)
    }

    /// Scores a caller-supplied keyword list and ranks the best `top_n`.
    ///
    /// # Errors
    ///
    /// As [`Analyzer::score_keywords`].
    pub async fn rank_keywords<S: AsRef<str> + Sync>(
        &self,
        keywords: &[S],
        top_n: usize,
    ) -> Result<OpportunityReport, AnalysisError> {
        let cleaned = normalize_keywords(keywords)?;
        Ok(self.scorer.rank_opportunities(&cleaned, top_n).await)
    }
}
