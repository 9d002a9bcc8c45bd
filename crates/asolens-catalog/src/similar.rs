//! Similar-app id extraction from an App Store product page.

use std::sync::LazyLock;

use regex::Regex;

static APP_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)/app/(?:[^/"'\s<>?]+/)?id(\d{6,})"#).expect("valid app link regex")
});

/// Returns app ids linked from `html` in first-seen order, without duplicates
/// and without `self_id`.
#[must_use]
pub fn extract_linked_app_ids(html: &str, self_id: u64) -> Vec<u64> {
    let mut ids: Vec<u64> = Vec::new();
    for cap in APP_LINK_RE.captures_iter(html) {
        let Some(id) = cap.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) else {
            continue;
        };
        if id != self_id && !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
