use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::Deserialize;

use asolens_core::{AnalysisResult, KeywordScore};
use asolens_providers::GenerationRequest;

use super::{map_analysis_error, map_json_rejection, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

/// App ids arrive either as JSON numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum AppIdInput {
    Number(i64),
    Text(String),
}

impl AppIdInput {
    fn as_text(&self) -> String {
        match self {
            AppIdInput::Number(n) => n.to_string(),
            AppIdInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeAppRequest {
    app_id: Option<AppIdInput>,
    ai_provider: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeKeywordsRequest {
    keywords: Option<Vec<String>>,
}

pub(super) async fn analyze_app(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyzeAppRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisResult>>, ApiError> {
    let rid = &req_id.0;
    let Json(body) = body.map_err(|e| map_json_rejection(rid, &e))?;

    let Some(app_id) = body.app_id.as_ref().map(AppIdInput::as_text) else {
        return Err(ApiError::new(rid, "validation_error", "appId is required"));
    };

    tracing::info!(
        request_id = %rid,
        app_id = %app_id,
        provider = body.ai_provider.as_deref().unwrap_or("environment default"),
        "analyze-app request"
    );

    let request = GenerationRequest::with_provider(body.ai_provider.as_deref());
    let result = state
        .analyzer
        .analyze(&app_id, &request)
        .await
        .map_err(|e| map_analysis_error(rid, &e))?;

    Ok(ApiResponse::new(req_id.0, result))
}

pub(super) async fn analyze_keywords(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalyzeKeywordsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Vec<KeywordScore>>>, ApiError> {
    let rid = &req_id.0;
    let Json(body) = body.map_err(|e| map_json_rejection(rid, &e))?;

    let keywords = body.keywords.unwrap_or_default();
    if keywords.is_empty() {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "keywords array is required and must not be empty",
        ));
    }

    tracing::info!(request_id = %rid, count = keywords.len(), "analyze-keywords request");

    let scores = state
        .analyzer
        .score_keywords(&keywords)
        .await
        .map_err(|e| map_analysis_error(rid, &e))?;

    Ok(ApiResponse::new(req_id.0, scores))
}
