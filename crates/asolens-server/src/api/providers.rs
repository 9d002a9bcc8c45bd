use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};
use serde::Serialize;

use asolens_providers::ProviderStatus;

use super::{ApiResponse, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct ProvidersData {
    providers: Vec<ProviderStatus>,
    configuration: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ConfigData {
    configuration: BTreeMap<&'static str, String>,
    note: &'static str,
}

pub(super) async fn list_providers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ProvidersData>> {
    ApiResponse::new(
        req_id.0,
        ProvidersData {
            providers: state.providers.statuses(),
            configuration: state.providers.environment_report().into_iter().collect(),
        },
    )
}

pub(super) async fn get_config(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ConfigData>> {
    ApiResponse::new(
        req_id.0,
        ConfigData {
            configuration: state.providers.environment_report().into_iter().collect(),
            note: "API keys are shown only as set or not set",
        },
    )
}
