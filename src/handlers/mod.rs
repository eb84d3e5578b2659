pub mod connect;
pub mod customers;
pub mod payments;
pub mod transactions;

use crate::schemas::ConfigResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use utoipa::OpenApi;

pub async fn root() -> &'static str {
    "OK"
}

/// Service health
///
/// Reports whether the payment platform answers with the configured key.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Platform reachable", body = crate::health::HealthResponse),
        (status = 503, description = "Platform unreachable", body = crate::health::HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.health_checker.check_all().await;

    let status_code = match report.status.as_str() {
        "healthy" | "degraded" => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(report))
}

pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        publishable_key: state.publishable_key.clone(),
    })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::ApiDoc::openapi())
}
