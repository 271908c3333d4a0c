//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/edumarket/config.toml`,
//! overridable via the `EDUMARKET_CONFIG` env var). Missing file falls
//! back to defaults, which include a demo tenant so the service is
//! usable out of the box.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tenant::{Tenant, TenantId, TenantRegistry};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub tenants: Vec<TenantConfig>,
    pub experiments: Vec<ExperimentConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter, e.g. `info` or `edumarket=debug,tower_http=info`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TenantConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExperimentConfig {
    pub name: String,
    /// Variant name to relative weight
    pub variants: Vec<VariantConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VariantConfig {
    pub name: String,
    pub weight: u32,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            tenants: vec![TenantConfig {
                id: "demo".to_string(),
                name: "Demo Academy".to_string(),
                features: vec!["certificates".to_string(), "courses".to_string()],
                active: true,
            }],
            experiments: vec![ExperimentConfig {
                name: "pricing-page".to_string(),
                variants: vec![
                    VariantConfig {
                        name: "control".to_string(),
                        weight: 50,
                    },
                    VariantConfig {
                        name: "treatment".to_string(),
                        weight: 50,
                    },
                ],
            }],
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        toml::from_str(&raw).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
    }

    /// Build the tenant registry from the configured tenants.
    pub fn tenant_registry(&self) -> TenantRegistry {
        let registry = TenantRegistry::new();
        for t in &self.tenants {
            registry.register(Tenant {
                id: TenantId::from(t.id.clone()),
                name: t.name.clone(),
                features: t.features.iter().cloned().collect(),
                is_active: t.active,
            });
        }
        registry
    }
}

pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("edumarket")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_a_usable_demo_tenant() {
        let cfg = AppConfig::default();
        let registry = cfg.tenant_registry();
        let tenant = registry.get(&TenantId::from("demo")).unwrap();
        assert!(tenant.is_active);
        assert!(tenant.features.contains("certificates"));
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [[tenants]]
            id = "acme"
            name = "Acme Academy"
            features = ["certificates"]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.tenants.len(), 1);
        assert!(cfg.tenants[0].active);
    }
}
