//! Pure scoring policy: scale, thresholds, and ranking order.

use std::cmp::Ordering;

use asolens_core::{KeywordScore, Level, Recommendation};

/// Converts an upstream 0–10 score to the 0–100 scale.
///
/// Rounds half away from zero (7.25 → 73), clamps to `0..=100`, and maps
/// non-finite input to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    (raw * 10.0).round().clamp(0.0, 100.0) as u8
}

/// Buckets a 0–100 score. Used for both traffic and competition.
#[must_use]
pub fn classify_level(score: u8) -> Level {
    match score {
        80.. => Level::VeryHigh,
        60..=79 => Level::High,
        40..=59 => Level::Medium,
        20..=39 => Level::Low,
        _ => Level::VeryLow,
    }
}

/// First matching rule wins; anything unmatched is `Consider`.
#[must_use]
pub fn recommend(traffic: u8, difficulty: u8) -> Recommendation {
    if traffic >= 60 && difficulty <= 40 {
        Recommendation::Excellent
    } else if traffic >= 40 && difficulty <= 50 {
        Recommendation::Good
    } else if traffic >= 60 && difficulty >= 70 {
        Recommendation::Challenging
    } else if traffic <= 30 && difficulty >= 60 {
        Recommendation::Avoid
    } else {
        Recommendation::Consider
    }
}

/// Best opportunity first: recommendation rank descending, then traffic
/// descending, then difficulty ascending.
#[must_use]
pub fn opportunity_order(a: &KeywordScore, b: &KeywordScore) -> Ordering {
    b.recommendation
        .rank()
        .cmp(&a.recommendation.rank())
        .then_with(|| b.traffic_score.cmp(&a.traffic_score))
        .then_with(|| a.difficulty_score.cmp(&b.difficulty_score))
}
