//! Multi-tenant request context and feature gating

pub mod context;
pub mod middleware;

pub use context::{SharedTenantRegistry, Tenant, TenantContext, TenantId, TenantRegistry};
pub use middleware::{tenant_middleware, TENANT_HEADER};
