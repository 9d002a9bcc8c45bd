//! ASO keyword scoring: upstream lookup, scale normalisation, level
//! classification, and recommendation.

pub mod engine;
pub mod error;
pub mod lookup;
pub mod policy;

pub use engine::{AsoScorer, OpportunityReport, RecommendationSummary};
pub use error::ScoringError;
pub use lookup::{AsoLookupClient, KeywordLookup, LookupScores, ScoreComponent};
pub use policy::{classify_level, opportunity_order, recommend, scale_score};
