//! Integration tests for `ClaudeProvider` using wiremock HTTP mocks.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use asolens_core::{AppProfile, ProviderId};
use asolens_providers::{
    ClaudeProvider, HttpImageFetcher, KeywordProvider, ProviderConfig, ProviderError,
};

fn profile(screenshots: Vec<String>) -> AppProfile {
    AppProfile {
        title: "WhatsApp Messenger".into(),
        description: "Simple. Reliable. Private.".into(),
        genres: vec!["Social Networking".into()],
        screenshots,
    }
}

fn test_provider(server: &MockServer) -> ClaudeProvider {
    let images = HttpImageFetcher::new(5, "asolens-test/0.1").expect("fetcher");
    ClaudeProvider::with_base_url(
        "sk-ant-test",
        ProviderConfig::defaults_for(ProviderId::Claude),
        Arc::new(images),
        5,
        &server.uri(),
    )
    .expect("provider construction should not fail")
}

fn tool_use_response(keywords: &[&str]) -> serde_json::Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{
            "type": "tool_use",
            "id": "toolu_01",
            "name": "generate_app_keywords",
            "input": {"keywords": keywords}
        }],
        "stop_reason": "tool_use"
    })
}

#[tokio::test]
async fn generate_keywords_returns_tool_output_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": "claude-sonnet-4-20250514",
            "tool_choice": {"type": "tool", "name": "generate_app_keywords"}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tool_use_response(&["chat", "messaging", "talk"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let keywords = test_provider(&server)
        .generate_keywords(&profile(vec![]))
        .await
        .expect("should generate keywords");

    assert_eq!(keywords.keywords(), ["chat", "messaging", "talk"]);
}

#[tokio::test]
async fn failing_screenshot_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shots/ok.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(b"png-bytes".to_vec()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shots/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    // Only the surviving image is embedded, as the second content block.
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({
            "messages": [{"role": "user", "content": [
                {"type": "text"},
                {"type": "image", "source": {"type": "base64", "media_type": "image/png", "data": "cG5nLWJ5dGVz"}}
            ]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tool_use_response(&["chat"])))
        .expect(1)
        .mount(&server)
        .await;

    let shots = vec![
        format!("{}/shots/ok.png", server.uri()),
        format!("{}/shots/missing.jpg", server.uri()),
    ];
    let keywords = test_provider(&server)
        .generate_keywords(&profile(shots))
        .await
        .expect("image failure must not abort generation");
    assert_eq!(keywords.keywords(), ["chat"]);
}

#[tokio::test]
async fn api_error_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let err = test_provider(&server)
        .generate_keywords(&profile(vec![]))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ProviderError::Api { status: 401, ref message, .. } if message == "invalid x-api-key"),
        "unexpected error: {err:?}"
    );
    assert!(err.to_string().starts_with("Claude AI error:"));
}

#[tokio::test]
async fn response_without_tool_use_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "Here are some keywords: chat, talk"}]
        })))
        .mount(&server)
        .await;

    let err = test_provider(&server)
        .generate_keywords(&profile(vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::NoStructuredCall { .. }), "got: {err:?}");
}
