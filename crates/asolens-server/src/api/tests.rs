use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use asolens_catalog::{CatalogError, StoreCatalog};
use asolens_core::{AppProfile, KeywordSet, Platform, ProviderId, SimilarApp};
use asolens_providers::{
    FetchedImage, GenerateKeywords, GenerationError, GenerationRequest, ImageFetchError,
    ImageFetcher, ProviderSettings,
};
use asolens_scoring::{AsoScorer, KeywordLookup, LookupScores, ScoreComponent, ScoringError};

use super::*;

struct FakeCatalog;

#[async_trait]
impl StoreCatalog for FakeCatalog {
    async fn fetch_app(&self, id: u64) -> Result<AppProfile, CatalogError> {
        match id {
            123 => Ok(AppProfile {
                title: "Primary".into(),
                description: "desc".into(),
                genres: vec![],
                screenshots: vec![],
            }),
            _ => Err(CatalogError::NotFound { id }),
        }
    }

    async fn fetch_similar(&self, _id: u64) -> Result<Vec<SimilarApp>, CatalogError> {
        Ok(Vec::new())
    }
}

struct FakeGenerator;

#[async_trait]
impl GenerateKeywords for FakeGenerator {
    async fn generate(
        &self,
        _profile: &AppProfile,
        request: &GenerationRequest,
    ) -> Result<KeywordSet, GenerationError> {
        if let Some(name) = request.provider.as_deref() {
            name.parse::<ProviderId>()?;
        }
        Ok(KeywordSet::new(vec!["chat".into(), "messaging".into(), "talk".into()])
            .expect("non-empty"))
    }
}

struct FakeLookup;

#[async_trait]
impl KeywordLookup for FakeLookup {
    async fn lookup(
        &self,
        keyword: &str,
        _platform: Platform,
    ) -> Result<LookupScores, ScoringError> {
        if keyword == "zzz" {
            return Err(ScoringError::UnexpectedStatus {
                keyword: keyword.to_owned(),
                status: 500,
            });
        }
        Ok(LookupScores {
            traffic: ScoreComponent { score: 7.25 },
            difficulty: ScoreComponent { score: 2.5 },
        })
    }
}

struct NoImages;

#[async_trait]
impl ImageFetcher for NoImages {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageFetchError> {
        Err(ImageFetchError::Status {
            url: url.to_owned(),
            status: 404,
        })
    }
}

fn test_app() -> Router {
    let scorer = AsoScorer::new(Arc::new(FakeLookup), Platform::Itunes).with_pacing(Duration::ZERO);
    let analyzer = Analyzer::new(
        Arc::new(FakeCatalog),
        Arc::new(FakeGenerator),
        Arc::new(scorer),
    );
    let providers = ProviderSelector::new(
        ProviderSettings {
            gemini_api_key: Some("secret-gemini-key".into()),
            ..ProviderSettings::default()
        },
        Arc::new(NoImages),
    );
    build_app(AppState {
        analyzer: Arc::new(analyzer),
        providers: Arc::new(providers),
    })
}

async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = test_app().oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("validation_error", StatusCode::BAD_REQUEST),
        ("not_found", StatusCode::NOT_FOUND),
        ("config_error", StatusCode::INTERNAL_SERVER_ERROR),
        ("provider_error", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, expected) in cases {
        let response = ApiError::new("req-1", code, "msg").into_response();
        assert_eq!(response.status(), expected, "{code}");
    }
}

#[tokio::test]
async fn health_echoes_request_id() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("x-request-id", "req-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-abc")
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"]["status"], "healthy");
    assert_eq!(json["meta"]["request_id"], "req-abc");
}

#[tokio::test]
async fn providers_report_availability_without_secrets() {
    let (status, json) = send(get("/api/providers")).await;
    assert_eq!(status, StatusCode::OK);

    let providers = json["data"]["providers"].as_array().expect("providers array");
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0]["id"], "gemini");
    assert_eq!(providers[0]["available"], true);
    assert_eq!(providers[0]["isDefault"], true);
    assert_eq!(providers[1]["available"], false);

    assert_eq!(json["data"]["configuration"]["GEMINI_API_KEY"], "[set]");
    assert!(!json.to_string().contains("secret-gemini-key"));
}

#[tokio::test]
async fn config_is_masked() {
    let (status, json) = send(get("/api/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["configuration"]["ANTHROPIC_API_KEY"], "[not set]");
    assert!(!json.to_string().contains("secret-gemini-key"));
}

#[tokio::test]
async fn analyze_app_returns_result() {
    let (status, json) = send(post_json("/api/analyze-app", r#"{"appId": "123"}"#)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["appData"]["title"], "Primary");
    assert_eq!(json["data"]["allKeywords"].as_array().unwrap().len(), 3);
    assert_eq!(json["data"]["keywordAnalysis"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn analyze_app_accepts_numeric_id() {
    let (status, _) = send(post_json("/api/analyze-app", r#"{"appId": 123}"#)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn analyze_app_rejects_bad_ids() {
    for body in [r#"{}"#, r#"{"appId": "abc"}"#, r#"{"appId": 0}"#, r#"{"appId": -4}"#] {
        let (status, json) = send(post_json("/api/analyze-app", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["error"]["code"], "validation_error");
    }
}

#[tokio::test]
async fn analyze_app_unknown_app_is_404() {
    let (status, json) = send(post_json("/api/analyze-app", r#"{"appId": "999"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn analyze_app_unknown_provider_is_config_error() {
    let (status, json) = send(post_json(
        "/api/analyze-app",
        r#"{"appId": "123", "aiProvider": "openai"}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "config_error");
    assert!(json["error"]["message"]
        .as_str()
        .is_some_and(|m| m.contains("gemini, claude")));
}

#[tokio::test]
async fn malformed_body_is_validation_error() {
    let (status, json) = send(post_json("/api/analyze-app", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn analyze_keywords_scores_and_absorbs_failures() {
    let (status, json) = send(post_json(
        "/api/analyze-keywords",
        r#"{"keywords": ["chat", "  ", "zzz"]}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");

    let scores = json["data"].as_array().expect("scores array");
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0]["trafficScore"], 73);
    assert_eq!(scores[0]["difficultyScore"], 25);
    assert_eq!(scores[0]["recommendation"], "excellent");
    assert_eq!(scores[1]["recommendation"], "analysis_failed");
}

#[tokio::test]
async fn analyze_keywords_validates_input() {
    let too_many: Vec<String> = (0..21).map(|i| format!("\"kw{i}\"")).collect();
    let too_many = format!(r#"{{"keywords": [{}]}}"#, too_many.join(","));

    for body in [r#"{}"#, r#"{"keywords": []}"#, r#"{"keywords": [" "]}"#, too_many.as_str()] {
        let (status, json) = send(post_json("/api/analyze-keywords", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json["error"]["code"], "validation_error");
    }
}

#[tokio::test]
async fn unknown_route_is_404_envelope() {
    let (status, json) = send(get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["message"], "Endpoint GET /api/nope not found");
}
