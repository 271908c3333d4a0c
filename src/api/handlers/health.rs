//! Health and metrics endpoints

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::handlers::AppState;

/// Service health
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the service is running normally
    pub status: String,
    /// Crate version (from Cargo.toml)
    pub version: String,
    pub uptime_seconds: u64,
}

/// Service liveness probe
///
/// No tenant header or authorization required.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// Prometheus metrics in text exposition format
pub async fn metrics(State(state): State<AppState>) -> String {
    state.prometheus.render()
}
