//! The analysis pipeline: fetch an app and its neighbours, generate keywords
//! for each, then sample and score them.

pub mod analyzer;
pub mod error;
pub mod input;
mod partition;
pub mod sampling;
pub mod wiring;

pub use analyzer::{Analyzer, DEFAULT_SAMPLE_SIZE, DEFAULT_SIMILAR_LIMIT};
pub use error::{AnalysisError, SetupError};
pub use input::{normalize_keywords, parse_app_id, MAX_DIRECT_KEYWORDS};
pub use sampling::sample_keywords;
pub use wiring::Services;
