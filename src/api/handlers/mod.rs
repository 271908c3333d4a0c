//! API handlers

pub mod certificates;
pub mod courses;
pub mod enrollments;
pub mod experiments;
pub mod health;
pub mod templates;

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::api::dto::ApiResponse;
use crate::application::{
    CertificateService, CourseService, EnrollmentService, ExperimentProvider, TemplateService,
};
use crate::shared::DomainError;

/// Shared handler state, built once in the composition root
#[derive(Clone)]
pub struct AppState {
    pub certificates: Arc<CertificateService>,
    pub courses: Arc<CourseService>,
    pub enrollments: Arc<EnrollmentService>,
    pub templates: Arc<TemplateService>,
    pub experiments: Arc<ExperimentProvider>,
    pub prometheus: PrometheusHandle,
    pub started_at: Instant,
}

/// Map a domain error onto an HTTP status and response envelope
pub(crate) fn domain_error_response(err: DomainError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) | DomainError::InvalidTransition(_) => StatusCode::CONFLICT,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(err.to_string())))
}
