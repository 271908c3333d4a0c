//! REST API module
//!
//! HTTP endpoints for the course catalog, enrollment progress,
//! certificate issuance and public verification.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::AppState;
pub use router::create_api_router;
