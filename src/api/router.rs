//! API router with Swagger UI

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::{
    certificates, courses, enrollments, experiments, health, templates, AppState,
};
use crate::tenant::{tenant_middleware, SharedTenantRegistry};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Edumarket API",
        description = "Educational marketplace backend: course catalog, \
            enrollment progress, certificate issuance and public \
            verification. Tenant-scoped endpoints require the \
            `X-Tenant-Id` header."
    ),
    paths(
        health::health_check,
        certificates::list_certificates,
        certificates::issue_certificate,
        certificates::get_certificate,
        certificates::revoke_certificate,
        certificates::set_certificate_url,
        certificates::verify_certificate,
        courses::list_courses,
        courses::create_course,
        courses::get_course,
        courses::publish_course,
        enrollments::enroll,
        enrollments::get_enrollment,
        enrollments::record_progress,
        templates::list_templates,
        templates::create_template,
        templates::set_default_template,
        experiments::get_variant,
    ),
    components(schemas(
        health::HealthResponse,
        certificates::CertificateResponse,
        certificates::IssueCertificateRequest,
        certificates::RevokeCertificateRequest,
        certificates::SetCertificateUrlRequest,
        certificates::VerificationResponse,
        courses::CourseResponse,
        courses::CreateCourseRequest,
        enrollments::EnrollmentResponse,
        enrollments::EnrollRequest,
        enrollments::RecordProgressRequest,
        templates::TemplateResponse,
        templates::CreateTemplateRequest,
        experiments::VariantResponse,
    ))
)]
struct ApiDoc;

/// Build the full application router.
///
/// Tenant-scoped routes sit behind the tenant-resolution middleware;
/// health, metrics, public verification, experiments and Swagger do not
/// require a tenant header.
pub fn create_api_router(state: AppState, registry: SharedTenantRegistry) -> Router {
    let tenant_routes = Router::new()
        .route(
            "/api/v1/certificates",
            get(certificates::list_certificates).post(certificates::issue_certificate),
        )
        .route("/api/v1/certificates/{id}", get(certificates::get_certificate))
        .route(
            "/api/v1/certificates/{id}/revoke",
            post(certificates::revoke_certificate),
        )
        .route(
            "/api/v1/certificates/{id}/url",
            put(certificates::set_certificate_url),
        )
        .route(
            "/api/v1/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route("/api/v1/courses/{id}", get(courses::get_course))
        .route("/api/v1/courses/{id}/publish", post(courses::publish_course))
        .route("/api/v1/enrollments", post(enrollments::enroll))
        .route("/api/v1/enrollments/{id}", get(enrollments::get_enrollment))
        .route(
            "/api/v1/enrollments/{id}/progress",
            put(enrollments::record_progress),
        )
        .route(
            "/api/v1/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/api/v1/templates/{id}/default",
            post(templates::set_default_template),
        )
        .layer(middleware::from_fn_with_state(registry, tenant_middleware))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route(
            "/api/v1/verify/{code}",
            get(certificates::verify_certificate),
        )
        .route(
            "/api/v1/experiments/{name}/variant",
            get(experiments::get_variant),
        )
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public_routes)
        .merge(tenant_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
