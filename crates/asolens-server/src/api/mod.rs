mod analyze;
mod providers;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use asolens_analyzer::{AnalysisError, Analyzer};
use asolens_providers::ProviderSelector;

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub providers: Arc<ProviderSelector>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    version: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(request_id: String, data: T) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(request_id),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_analysis_error(request_id: &str, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::Validation(_) | AnalysisError::NotFound(_) => {
            tracing::info!(error = %error, "analysis request rejected");
        }
        _ => tracing::error!(error = %error, "analysis request failed"),
    }
    ApiError::new(request_id, error.code(), error.to_string())
}

pub(super) fn map_json_rejection(request_id: &str, rejection: &JsonRejection) -> ApiError {
    ApiError::new(
        request_id,
        "validation_error",
        format!("invalid request body: {}", rejection.body_text()),
    )
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/providers", get(providers::list_providers))
        .route("/api/config", get(providers::get_config))
        .route("/api/analyze-app", post(analyze::analyze_app))
        .route("/api/analyze-keywords", post(analyze::analyze_keywords))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    ApiResponse::new(
        req_id.0,
        HealthData {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn not_found(
    Extension(req_id): Extension<RequestId>,
    method: Method,
    uri: axum::http::Uri,
) -> ApiError {
    ApiError::new(
        req_id.0,
        "not_found",
        format!("Endpoint {method} {} not found", uri.path()),
    )
}

#[cfg(test)]
mod tests;
