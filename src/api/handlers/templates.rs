//! Certificate template REST API handlers

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
use crate::domain::certificate::{CertificateTemplate, TemplateDesign};
use crate::tenant::TenantContext;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// A certificate design template
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TemplateResponse {
    pub id: Uuid,
    pub name: String,
    pub design: TemplateDesign,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CertificateTemplate> for TemplateResponse {
    fn from(t: CertificateTemplate) -> Self {
        Self {
            id: t.id,
            name: t.name,
            design: t.design,
            is_default: t.is_default,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTemplateRequest {
    pub name: String,
    /// Full design document; the default layout is used when omitted
    pub design: Option<TemplateDesign>,
    /// Make this the tenant's default template
    #[serde(default)]
    pub is_default: bool,
}

/// List the tenant's templates
#[utoipa::path(
    get,
    path = "/api/v1/templates",
    tag = "Templates",
    responses(
        (status = 200, description = "Templates", body = ApiResponse<Vec<TemplateResponse>>)
    )
)]
pub async fn list_templates(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
) -> Result<Json<ApiResponse<Vec<TemplateResponse>>>, HandlerError> {
    let templates = state
        .templates
        .list(&tenant.tenant_id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        templates.into_iter().map(Into::into).collect(),
    )))
}

/// Create a template
#[utoipa::path(
    post,
    path = "/api/v1/templates",
    tag = "Templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = ApiResponse<TemplateResponse>),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_template(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TemplateResponse>>), HandlerError> {
    let created = state
        .templates
        .create(
            &tenant.tenant_id,
            req.name,
            req.design.unwrap_or_default(),
            req.is_default,
        )
        .await
        .map_err(domain_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
}

/// Make a template the tenant default
///
/// Clears the flag on the previous default.
#[utoipa::path(
    post,
    path = "/api/v1/templates/{id}/default",
    tag = "Templates",
    params(("id" = Uuid, Path, description = "Template id")),
    responses(
        (status = 200, description = "Default updated", body = ApiResponse<TemplateResponse>),
        (status = 404, description = "Template not found")
    )
)]
pub async fn set_default_template(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TemplateResponse>>, HandlerError> {
    let updated = state
        .templates
        .set_default(&tenant.tenant_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(updated.into())))
}
