//! Course catalog REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::dto::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::api::handlers::{domain_error_response, AppState};
use crate::application::CreateCourseInput;
use crate::domain::course::Course;
use crate::shared::validations::validate_pagination;
use crate::tenant::TenantContext;

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

/// A catalog course
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor_name: String,
    pub duration_hours: Option<u32>,
    /// `null` for free courses
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    /// Currency code (ISO 4217)
    pub currency: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            instructor_name: c.instructor_name,
            duration_hours: c.duration_hours,
            price: c.price,
            currency: c.currency,
            is_published: c.is_published,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Request to create a course
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub instructor_name: String,
    pub duration_hours: Option<u32>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub currency: Option<String>,
}

/// List the tenant's courses
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    tag = "Courses",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Courses page", body = ApiResponse<PaginatedResponse<CourseResponse>>)
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<CourseResponse>>>, HandlerError> {
    let courses = state
        .courses
        .list(&tenant.tenant_id)
        .await
        .map_err(domain_error_response)?;

    let (page, limit) = validate_pagination(pagination.page, pagination.limit);
    let mut responses: Vec<CourseResponse> = courses.into_iter().map(Into::into).collect();
    responses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(ApiResponse::success(PaginatedResponse::paginate(
        responses, page, limit,
    ))))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    tag = "Courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<CourseResponse>),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_course(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Json(req): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CourseResponse>>), HandlerError> {
    let created = state
        .courses
        .create(
            &tenant.tenant_id,
            CreateCourseInput {
                title: req.title,
                description: req.description,
                instructor_name: req.instructor_name,
                duration_hours: req.duration_hours,
                price: req.price,
                currency: req.currency,
            },
        )
        .await
        .map_err(domain_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    tag = "Courses",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = ApiResponse<CourseResponse>),
        (status = 404, description = "Course not found")
    )
)]
pub async fn get_course(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseResponse>>, HandlerError> {
    let course = state
        .courses
        .get(&tenant.tenant_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(course.into())))
}

/// Publish a course, making it enrollable
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/publish",
    tag = "Courses",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course published", body = ApiResponse<CourseResponse>),
        (status = 404, description = "Course not found")
    )
)]
pub async fn publish_course(
    State(state): State<AppState>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseResponse>>, HandlerError> {
    let published = state
        .courses
        .publish(&tenant.tenant_id, id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(published.into())))
}
