//! Prompt text and the structured-output tool shared by every provider.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};

use asolens_core::AppProfile;

/// Name of the structured-output function both backends are forced to call.
pub const KEYWORD_TOOL_NAME: &str = "generate_app_keywords";

pub const KEYWORD_TOOL_DESCRIPTION: &str =
    "Generates relevant search keywords for app store optimization based on app data and screenshots";

/// Shared instruction text, before any provider-specific suffix.
#[must_use]
pub fn base_prompt(profile: &AppProfile) -> String {
    format!(
        "Analyze this app store data and generate the most relevant search keywords that users \
would likely use to find this app:\n\n\
Title: {title}\n\n\
Description: {description}\n\n\
I'm also providing screenshots of the app store page. Using the information provided in the \
screenshots, and the description of the app, provide the most relevant search queries directly \
related to the app and the information provided in screenshots, title, subtitle and description. \
ensuring only keywords/search queries that would be exact search phrases derived from title, \
subtitle, app screenshots, and description. exclude long tail keywords, \"* app\" search phrases \
and any search phrases a user wouldn't realistically search for.\n\n\
Generate 10-15 highly relevant keywords for app store search optimization.",
        title = profile.title,
        description = profile.description,
    )
}

/// JSON schema of the tool's single `keywords` argument.
#[must_use]
pub fn keyword_tool_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "keywords": {
                "type": "array",
                "items": {
                    "type": "string",
                    "description": "A relevant search keyword that users would likely use to find this app"
                },
                "description": "Array of 10-15 highly relevant keywords for app store search optimization"
            }
        },
        "required": ["keywords"]
    })
}

/// Pulls the `keywords` array out of a tool call's arguments.
///
/// Non-string items and blank strings are dropped; order and duplicates are
/// kept. Returns `None` when nothing usable remains.
#[must_use]
pub fn keywords_from_arguments(args: &Value) -> Option<Vec<String>> {
    let keywords: Vec<String> = args
        .get("keywords")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect();
    (!keywords.is_empty()).then_some(keywords)
}

static BRACKETED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"));

/// Recovers keywords from free text containing a bracketed list such as
/// `["chat", 'messaging', talk]`.
///
/// Only the first bracketed group is read.
#[must_use]
pub fn keywords_from_text(text: &str) -> Option<Vec<String>> {
    let inner = BRACKETED_LIST.captures(text)?.get(1)?.as_str();
    let keywords: Vec<String> = inner
        .split(',')
        .map(|k| k.trim().trim_matches(['"', '\'']).trim())
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect();
    (!keywords.is_empty()).then_some(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> AppProfile {
        AppProfile {
            title: "WhatsApp Messenger".into(),
            description: "Simple. Reliable. Private.".into(),
            genres: vec![],
            screenshots: vec![],
        }
    }

    #[test]
    fn base_prompt_embeds_title_and_description() {
        let prompt = base_prompt(&profile());
        assert!(prompt.contains("Title: WhatsApp Messenger\n\nDescription: Simple. Reliable. Private."));
        assert!(prompt.ends_with("Generate 10-15 highly relevant keywords for app store search optimization."));
    }

    #[test]
    fn schema_requires_keywords_array() {
        let schema = keyword_tool_schema();
        assert_eq!(schema["required"], json!(["keywords"]));
        assert_eq!(schema["properties"]["keywords"]["type"], "array");
    }

    #[test]
    fn arguments_keep_order_and_duplicates() {
        let args = json!({"keywords": ["chat", " messaging ", "", 7, "chat"]});
        assert_eq!(
            keywords_from_arguments(&args).unwrap(),
            ["chat", "messaging", "chat"]
        );
    }

    #[test]
    fn arguments_without_keywords_yield_none() {
        assert!(keywords_from_arguments(&json!({})).is_none());
        assert!(keywords_from_arguments(&json!({"keywords": []})).is_none());
        assert!(keywords_from_arguments(&json!({"keywords": "chat"})).is_none());
    }

    #[test]
    fn text_fallback_strips_quotes() {
        let text = "Here you go: [\"chat\", 'messaging',  talk ] enjoy";
        assert_eq!(
            keywords_from_text(text).unwrap(),
            ["chat", "messaging", "talk"]
        );
    }

    #[test]
    fn text_without_list_yields_none() {
        assert!(keywords_from_text("no keywords here").is_none());
        assert!(keywords_from_text("[ , ]").is_none());
    }
}
