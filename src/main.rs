//! Edumarket service entry point
//!
//! Reads configuration from TOML (~/.config/edumarket/config.toml or
//! `EDUMARKET_CONFIG`), wires the in-memory repositories, services and
//! event bus, and serves the REST API.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use edumarket::application::experiments::{Experiment, ExperimentProvider, Variant};
use edumarket::application::{
    create_event_bus, CertificateService, CourseService, EnrollmentService, TemplateService,
};
use edumarket::domain::certificate::{
    CertificateSequence, CertificateTemplate, CertificateTemplateRepository, TemplateDesign,
};
use edumarket::infrastructure::{
    InMemoryCertificateRepository, InMemoryCourseRepository, InMemoryEnrollmentRepository,
    InMemoryTemplateRepository,
};
use edumarket::tenant::TenantId;
use edumarket::{create_api_router, default_config_path, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("EDUMARKET_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    info!("Starting Edumarket service...");

    // ── Prometheus metrics recorder (before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Tenants ────────────────────────────────────────────────
    let registry = Arc::new(config.tenant_registry());
    info!(tenants = registry.len(), "Tenant registry initialized");

    // ── Repositories (in-memory) ───────────────────────────────
    let certificates = Arc::new(InMemoryCertificateRepository::new());
    let templates = Arc::new(InMemoryTemplateRepository::new());
    let courses = Arc::new(InMemoryCourseRepository::new());
    let enrollments = Arc::new(InMemoryEnrollmentRepository::new());

    seed_default_templates(&config, templates.as_ref()).await;

    // ── Event bus & services ───────────────────────────────────
    let event_bus = create_event_bus();
    info!("Event bus initialized");

    let sequence = Arc::new(CertificateSequence::new());
    let certificate_service = Arc::new(CertificateService::new(
        certificates.clone(),
        templates.clone(),
        courses.clone(),
        enrollments.clone(),
        event_bus.clone(),
        sequence,
    ));
    let course_service = Arc::new(CourseService::new(courses.clone()));
    let enrollment_service = Arc::new(EnrollmentService::new(
        enrollments.clone(),
        courses.clone(),
        event_bus.clone(),
    ));
    let template_service = Arc::new(TemplateService::new(templates.clone()));

    let experiments = Arc::new(ExperimentProvider::new(
        config
            .experiments
            .iter()
            .map(|e| Experiment {
                name: e.name.clone(),
                variants: e
                    .variants
                    .iter()
                    .map(|v| Variant {
                        name: v.name.clone(),
                        weight: v.weight,
                    })
                    .collect(),
            })
            .collect(),
        event_bus.clone(),
    ));

    // ── Router & server ────────────────────────────────────────
    let state = AppState {
        certificates: certificate_service,
        courses: course_service,
        enrollments: enrollment_service,
        templates: template_service,
        experiments,
        prometheus: prometheus_handle,
        started_at: Instant::now(),
    };
    let app = create_api_router(state, registry);

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on http://{}", address);
    info!("Swagger UI at http://{}/swagger-ui", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Every configured tenant gets a default template so certificate
/// issuance works before any template is created through the API.
async fn seed_default_templates(config: &AppConfig, templates: &InMemoryTemplateRepository) {
    for tenant in &config.tenants {
        let mut template = CertificateTemplate::new(
            TenantId::from(tenant.id.clone()),
            "Course Completion",
            TemplateDesign::default(),
        );
        template.set_default(true);
        match templates.save(template).await {
            Ok(saved) => info!(tenant = %tenant.id, template = %saved.id, "Seeded default template"),
            Err(e) => error!(tenant = %tenant.id, "Failed to seed template: {}", e),
        }
    }
}

fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
