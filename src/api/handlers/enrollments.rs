//! Enrollment REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{domain_error_response, AppState};
use crate::domain::enrollment::Enrollment;
use crate::tenant::TenantContext;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// A student's course enrollment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    /// 0-100, monotonic
    pub progress_percent: u8,
    pub score: Option<f32>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(e: Enrollment) -> Self {
        let is_completed = e.is_completed();
        Self {
            id: e.id,
            student_id: e.student_id,
            course_id: e.course_id,
            enrolled_at: e.enrolled_at,
            progress_percent: e.progress_percent,
            score: e.score,
            completed_at: e.completed_at,
            is_completed,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EnrollRequest {
    pub student_id: Uuid,
    pub course_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordProgressRequest {
    /// 0-100; values above 100 are clamped
    pub percent: u8,
    /// Optional assessment score, 0-100
    pub score: Option<f32>,
}

/// Enroll a student in a published course
///
/// Idempotent: re-enrolling returns the existing enrollment.
#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    tag = "Enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrollment", body = ApiResponse<EnrollmentResponse>),
        (status = 400, description = "Course not published"),
        (status = 404, description = "Course not found")
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Json(req): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EnrollmentResponse>>), HandlerError> {
    let enrollment = state
        .enrollments
        .enroll(&tenant.tenant_id, req.student_id, req.course_id)
        .await
        .map_err(domain_error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(enrollment.into())),
    ))
}

/// Get an enrollment by id
#[utoipa::path(
    get,
    path = "/api/v1/enrollments/{id}",
    tag = "Enrollments",
    params(("id" = Uuid, Path, description = "Enrollment id")),
    responses(
        (status = 200, description = "Enrollment", body = ApiResponse<EnrollmentResponse>),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn get_enrollment(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EnrollmentResponse>>, HandlerError> {
    let enrollment = state
        .enrollments
        .get(&tenant.tenant_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(enrollment.into())))
}

/// Record course progress
///
/// Progress never moves backwards; reaching 100 completes the
/// enrollment and publishes `enrollment_completed`.
#[utoipa::path(
    put,
    path = "/api/v1/enrollments/{id}/progress",
    tag = "Enrollments",
    params(("id" = Uuid, Path, description = "Enrollment id")),
    request_body = RecordProgressRequest,
    responses(
        (status = 200, description = "Updated enrollment", body = ApiResponse<EnrollmentResponse>),
        (status = 400, description = "Invalid score"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn record_progress(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordProgressRequest>,
) -> Result<Json<ApiResponse<EnrollmentResponse>>, HandlerError> {
    let enrollment = state
        .enrollments
        .record_progress(&tenant.tenant_id, id, req.percent, req.score)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(enrollment.into())))
}
