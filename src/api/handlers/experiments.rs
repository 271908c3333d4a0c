//! A/B experiment REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{domain_error_response, AppState};

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct VariantQuery {
    /// Stable subject identity (visitor or student id)
    pub subject_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VariantResponse {
    pub experiment: String,
    pub variant: String,
}

/// Assign the subject to a variant and track the exposure
///
/// Deterministic: the same subject always receives the same variant for
/// an experiment. Each call publishes an `experiment_exposure` event.
#[utoipa::path(
    get,
    path = "/api/v1/experiments/{name}/variant",
    tag = "Experiments",
    params(
        ("name" = String, Path, description = "Experiment name"),
        VariantQuery
    ),
    responses(
        (status = 200, description = "Assigned variant", body = ApiResponse<VariantResponse>),
        (status = 404, description = "Unknown experiment")
    )
)]
pub async fn get_variant(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<VariantQuery>,
) -> Result<Json<ApiResponse<VariantResponse>>, HandlerError> {
    let variant = state
        .experiments
        .assign_and_track(&name, query.subject_id)
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(VariantResponse {
        experiment: name,
        variant,
    })))
}
