//! # Edumarket Certificate Service
//!
//! Backend for a multi-tenant educational marketplace: course catalog,
//! enrollment progress tracking, certificate issuance with public
//! verification, and A/B experiment assignment.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, value objects, repository contracts, events
//! - **application**: Use cases, the event bus, experiment provider
//! - **infrastructure**: In-memory repository implementations
//! - **tenant**: Request-context resolution and feature gating
//! - **api**: REST API with Swagger documentation

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod tenant;

pub use config::{default_config_path, AppConfig};

// Re-export API surface
pub use api::{create_api_router, AppState};

// Re-export the event bus
pub use application::{create_event_bus, EventBus, SharedEventBus};
