//! Tenant resolution middleware for Axum
//!
//! Resolves the `X-Tenant-Id` header against the registry and inserts a
//! [`TenantContext`] extension for downstream handlers. Tenant data must
//! never leak across tenant boundaries; every tenant-scoped handler
//! reads the context this middleware provides.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;

use super::context::{SharedTenantRegistry, TenantContext, TenantId};

pub const TENANT_HEADER: &str = "x-tenant-id";

/// Resolve the request tenant or reject the request.
///
/// 400 when the header is missing, 404 for an unknown tenant, 403 for a
/// deactivated one.
pub async fn tenant_middleware(
    State(registry): State<SharedTenantRegistry>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(TENANT_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let Some(raw_id) = header else {
        return tenant_error_response(StatusCode::BAD_REQUEST, "Missing X-Tenant-Id header");
    };

    let tenant_id = TenantId::from(raw_id);
    let Some(tenant) = registry.get(&tenant_id) else {
        return tenant_error_response(StatusCode::NOT_FOUND, "Unknown tenant");
    };

    if !tenant.is_active {
        return tenant_error_response(StatusCode::FORBIDDEN, "Tenant is deactivated");
    }

    debug!(tenant = %tenant_id, "Tenant resolved");
    request.extensions_mut().insert(TenantContext::from(&tenant));
    next.run(request).await
}

fn tenant_error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "data": null,
            "error": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    use super::*;
    use crate::tenant::context::{Tenant, TenantRegistry};

    async fn whoami(Extension(ctx): Extension<TenantContext>) -> String {
        ctx.tenant_id.to_string()
    }

    fn test_router() -> Router {
        let registry: SharedTenantRegistry = Arc::new(TenantRegistry::new());
        registry.register(Tenant {
            id: TenantId::from("acme-academy"),
            name: "Acme Academy".to_string(),
            features: HashSet::new(),
            is_active: true,
        });
        registry.register(Tenant {
            id: TenantId::from("dormant"),
            name: "Dormant Co".to_string(),
            features: HashSet::new(),
            is_active: false,
        });
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(registry, tenant_middleware))
    }

    async fn status_for(header: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = header {
            builder = builder.header(TENANT_HEADER, value);
        }
        let request = builder.body(Body::empty()).unwrap();
        test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn request_without_tenant_header_is_rejected() {
        assert_eq!(status_for(None).await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for(Some("   ")).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_tenant_is_not_found() {
        assert_eq!(status_for(Some("nobody")).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deactivated_tenant_is_forbidden() {
        assert_eq!(status_for(Some("dormant")).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn active_tenant_reaches_the_handler_with_context() {
        let request = Request::builder()
            .uri("/whoami")
            .header(TENANT_HEADER, "acme-academy")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"acme-academy");
    }
}
