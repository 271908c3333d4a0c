//! Tenant identity, registry and request context

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, DomainResult};

/// Tenant identifier (URL-safe slug)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An isolated customer organization
#[derive(Debug, Clone)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    /// Feature flags enabled for this tenant, e.g. `certificates`
    pub features: HashSet<String>,
    pub is_active: bool,
}

/// Per-request tenant context, resolved by the middleware and inserted
/// as an axum extension.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub features: HashSet<String>,
}

impl TenantContext {
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.contains(name)
    }

    pub fn require_feature(&self, name: &str) -> DomainResult<()> {
        if self.has_feature(name) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "tenant {} does not have feature '{}'",
                self.tenant_id, name
            )))
        }
    }
}

impl From<&Tenant> for TenantContext {
    fn from(tenant: &Tenant) -> Self {
        Self {
            tenant_id: tenant.id.clone(),
            features: tenant.features.clone(),
        }
    }
}

/// In-memory tenant registry, seeded from configuration at startup
pub struct TenantRegistry {
    tenants: DashMap<TenantId, Tenant>,
}

impl TenantRegistry {
    pub fn new() -> Self {
        Self {
            tenants: DashMap::new(),
        }
    }

    pub fn register(&self, tenant: Tenant) {
        self.tenants.insert(tenant.id.clone(), tenant);
    }

    pub fn get(&self, id: &TenantId) -> Option<Tenant> {
        self.tenants.get(id).map(|t| t.clone())
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

impl Default for TenantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared registry handle
pub type SharedTenantRegistry = Arc<TenantRegistry>;

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(features: &[&str], active: bool) -> Tenant {
        Tenant {
            id: TenantId::from("acme-academy"),
            name: "Acme Academy".to_string(),
            features: features.iter().map(|s| s.to_string()).collect(),
            is_active: active,
        }
    }

    #[test]
    fn registry_lookup_round_trip() {
        let registry = TenantRegistry::new();
        registry.register(tenant(&["certificates"], true));
        let found = registry.get(&TenantId::from("acme-academy")).unwrap();
        assert_eq!(found.name, "Acme Academy");
        assert!(registry.get(&TenantId::from("unknown")).is_none());
    }

    #[test]
    fn feature_gating() {
        let ctx = TenantContext::from(&tenant(&["certificates"], true));
        assert!(ctx.require_feature("certificates").is_ok());
        let err = ctx.require_feature("payments").unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
}
