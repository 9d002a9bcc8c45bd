use crate::error::AnalysisError;

/// Upper bound on keywords accepted by direct scoring.
pub const MAX_DIRECT_KEYWORDS: usize = 20;

/// Parses a store app id: a positive integer, surrounding whitespace allowed.
///
/// # Errors
///
/// Returns [`AnalysisError::Validation`] for empty, non-numeric, or zero input.
pub fn parse_app_id(raw: &str) -> Result<u64, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::Validation("appId is required".to_owned()));
    }
    match trimmed.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AnalysisError::Validation(format!(
            "App ID must be a valid positive number, got '{trimmed}'"
        ))),
    }
}

/// Trims keywords and drops blank entries, keeping order.
///
/// # Errors
///
/// Returns [`AnalysisError::Validation`] if no keyword remains or more than
/// [`MAX_DIRECT_KEYWORDS`] remain.
pub fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<Vec<String>, AnalysisError> {
    let cleaned: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect();

    if cleaned.is_empty() {
        return Err(AnalysisError::Validation(
            "At least one valid keyword is required".to_owned(),
        ));
    }
    if cleaned.len() > MAX_DIRECT_KEYWORDS {
        return Err(AnalysisError::Validation(format!(
            "Maximum {MAX_DIRECT_KEYWORDS} keywords allowed per request, got {}",
            cleaned.len()
        )));
    }
    Ok(cleaned)
}
