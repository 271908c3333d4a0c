//! Certificate REST API handlers

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::dto::{ApiResponse, PaginatedResponse};
use crate::api::handlers::{domain_error_response, AppState};
use crate::application::IssueCertificateInput;
use crate::domain::certificate::{Certificate, CertificateId, CertificateStatus, VerificationCode};
use crate::shared::validations::validate_pagination;
use crate::tenant::TenantContext;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// An issued certificate
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CertificateResponse {
    pub id: Uuid,
    /// Human-readable number, e.g. `CERT-2024-000001`
    pub certificate_number: String,
    /// 10-character public verification code
    pub verification_code: String,
    pub student_id: Uuid,
    pub course_id: Option<Uuid>,
    pub enrollment_id: Option<Uuid>,
    pub template_id: Uuid,
    pub student_name: String,
    pub course_name: String,
    pub instructor_name: String,
    /// Derived: explicit grade, A-F banding over score, or `Pass`
    pub display_grade: String,
    pub completion_date: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Derived lifecycle status; `revoked` outranks `expired`
    pub status: CertificateStatus,
    pub is_valid: bool,
    pub certificate_url: Option<String>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub revocation_reason: Option<String>,
}

impl From<Certificate> for CertificateResponse {
    fn from(c: Certificate) -> Self {
        let status = c.status();
        let is_valid = c.is_valid();
        Self {
            id: c.id.as_uuid(),
            certificate_number: c.number.to_string(),
            verification_code: c.verification_code.to_string(),
            student_id: c.student_id,
            course_id: c.course_id,
            enrollment_id: c.enrollment_id,
            template_id: c.template_id,
            student_name: c.metadata.student_name.clone(),
            course_name: c.metadata.course_name.clone(),
            instructor_name: c.metadata.instructor_name.clone(),
            display_grade: c.metadata.display_grade(),
            completion_date: c.metadata.completion_date,
            issued_at: c.issued_at,
            expires_at: c.expires_at,
            status,
            is_valid,
            certificate_url: c.certificate_url,
            revoked_at: c.revoked_at,
            revocation_reason: c.revocation_reason,
        }
    }
}

/// Request to issue a certificate
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueCertificateRequest {
    pub student_id: Uuid,
    pub student_name: String,
    /// Course backing the certificate (name/instructor resolved from it)
    pub course_id: Option<Uuid>,
    /// Enrollment backing the certificate (completion date/score
    /// resolved from it)
    pub enrollment_id: Option<Uuid>,
    /// Explicit template; tenant default is used when omitted
    pub template_id: Option<Uuid>,
    /// 0-100
    pub score: Option<f32>,
    /// Explicit grade, overrides score banding
    pub grade: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_fields: HashMap<String, String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RevokeCertificateRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetCertificateUrlRequest {
    /// http(s) URL or absolute path of the rendered artifact
    pub url: String,
}

/// Public verification result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerificationResponse {
    pub certificate_number: String,
    pub verification_code: String,
    pub issued_at: DateTime<Utc>,
    /// `valid`, `expired` or `revoked`
    pub status: CertificateStatus,
    pub student_name: String,
    pub course_name: String,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ListCertificatesQuery {
    pub student_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    /// Page number (1-based). Default: 1
    pub page: Option<u32>,
    /// Items per page (1-100). Default: 50
    pub limit: Option<u32>,
}

/// List certificates for the tenant, filtered by student or course
#[utoipa::path(
    get,
    path = "/api/v1/certificates",
    tag = "Certificates",
    params(ListCertificatesQuery),
    responses(
        (status = 200, description = "Certificates page", body = ApiResponse<PaginatedResponse<CertificateResponse>>),
        (status = 400, description = "Neither student_id nor course_id given")
    )
)]
pub async fn list_certificates(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Query(query): Query<ListCertificatesQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<CertificateResponse>>>, HandlerError> {
    let certificates = match (query.student_id, query.course_id) {
        (Some(student_id), _) => state
            .certificates
            .list_for_student(&tenant.tenant_id, student_id)
            .await,
        (None, Some(course_id)) => state
            .certificates
            .list_for_course(&tenant.tenant_id, course_id)
            .await,
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("student_id or course_id is required")),
            ))
        }
    }
    .map_err(domain_error_response)?;

    let (page, limit) = validate_pagination(query.page, query.limit);
    let mut responses: Vec<CertificateResponse> =
        certificates.into_iter().map(Into::into).collect();
    responses.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        responses, page, limit,
    ))))
}

/// Issue a certificate
///
/// Requires the tenant to have the `certificates` feature. Resolves
/// course and enrollment context, generates identifiers and publishes a
/// `certificate_generated` event.
#[utoipa::path(
    post,
    path = "/api/v1/certificates",
    tag = "Certificates",
    request_body = IssueCertificateRequest,
    responses(
        (status = 201, description = "Certificate issued", body = ApiResponse<CertificateResponse>),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Tenant lacks the certificates feature")
    )
)]
pub async fn issue_certificate(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Json(req): Json<IssueCertificateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CertificateResponse>>), HandlerError> {
    tenant
        .require_feature("certificates")
        .map_err(domain_error_response)?;

    let issued = state
        .certificates
        .issue(
            &tenant.tenant_id,
            IssueCertificateInput {
                student_id: req.student_id,
                student_name: req.student_name,
                course_id: req.course_id,
                enrollment_id: req.enrollment_id,
                template_id: req.template_id,
                score: req.score,
                grade: req.grade,
                expires_at: req.expires_at,
                custom_fields: req.custom_fields,
            },
        )
        .await
        .map_err(domain_error_response)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(issued.into()))))
}

/// Get a certificate by id
#[utoipa::path(
    get,
    path = "/api/v1/certificates/{id}",
    tag = "Certificates",
    params(("id" = Uuid, Path, description = "Certificate id")),
    responses(
        (status = 200, description = "Certificate", body = ApiResponse<CertificateResponse>),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn get_certificate(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CertificateResponse>>, HandlerError> {
    let certificate = state
        .certificates
        .get(&tenant.tenant_id, CertificateId::from(id))
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(certificate.into())))
}

/// Revoke a certificate
///
/// One-way transition; revoking an already-revoked certificate returns
/// 409 and leaves the original revocation untouched.
#[utoipa::path(
    post,
    path = "/api/v1/certificates/{id}/revoke",
    tag = "Certificates",
    params(("id" = Uuid, Path, description = "Certificate id")),
    request_body = RevokeCertificateRequest,
    responses(
        (status = 200, description = "Certificate revoked", body = ApiResponse<CertificateResponse>),
        (status = 404, description = "Certificate not found"),
        (status = 409, description = "Already revoked")
    )
)]
pub async fn revoke_certificate(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<RevokeCertificateRequest>,
) -> Result<Json<ApiResponse<CertificateResponse>>, HandlerError> {
    let revoked = state
        .certificates
        .revoke(&tenant.tenant_id, CertificateId::from(id), req.reason)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(revoked.into())))
}

/// Record the rendered artifact location
#[utoipa::path(
    put,
    path = "/api/v1/certificates/{id}/url",
    tag = "Certificates",
    params(("id" = Uuid, Path, description = "Certificate id")),
    request_body = SetCertificateUrlRequest,
    responses(
        (status = 200, description = "URL recorded", body = ApiResponse<CertificateResponse>),
        (status = 400, description = "Malformed URL"),
        (status = 404, description = "Certificate not found")
    )
)]
pub async fn set_certificate_url(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetCertificateUrlRequest>,
) -> Result<Json<ApiResponse<CertificateResponse>>, HandlerError> {
    let updated = state
        .certificates
        .set_certificate_url(&tenant.tenant_id, CertificateId::from(id), req.url)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(updated.into())))
}

/// Verify a certificate by its public code
///
/// Public endpoint: no tenant header required, only public-safe fields
/// are returned.
#[utoipa::path(
    get,
    path = "/api/v1/verify/{code}",
    tag = "Verification",
    params(("code" = String, Path, description = "10-character verification code")),
    responses(
        (status = 200, description = "Verification result", body = ApiResponse<VerificationResponse>),
        (status = 404, description = "Unknown code")
    )
)]
pub async fn verify_certificate(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<VerificationResponse>>, HandlerError> {
    let data = state
        .certificates
        .verify(&VerificationCode::from(code.to_uppercase()))
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(VerificationResponse {
        certificate_number: data.certificate_number.to_string(),
        verification_code: data.verification_code.to_string(),
        issued_at: data.issued_at,
        status: data.status,
        student_name: data.student_name,
        course_name: data.course_name,
    })))
}
