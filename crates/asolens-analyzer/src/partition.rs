use std::fmt::Display;

use asolens_core::{SkipStage, SkippedItem};

/// Splits labelled per-item results into successes and skipped items,
/// logging a warning for each failure. Both halves keep input order.
pub(crate) fn partition_results<T, E: Display>(
    stage: SkipStage,
    attempts: Vec<(String, Result<T, E>)>,
) -> (Vec<T>, Vec<SkippedItem>) {
    let mut ok = Vec::with_capacity(attempts.len());
    let mut skipped = Vec::new();

    for (label, result) in attempts {
        match result {
            Ok(value) => ok.push(value),
            Err(e) => {
                tracing::warn!(stage = %stage, item = %label, error = %e, "skipping failed item");
                skipped.push(SkippedItem {
                    stage,
                    item: label,
                    reason: e.to_string(),
                });
            }
        }
    }

    (ok, skipped)
}
