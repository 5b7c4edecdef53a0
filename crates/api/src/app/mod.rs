//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: accessor/database ownership and configured credentials
//! - `routes/`: HTTP routes + handlers
//! - `validation.rs`: typed request validation extractors
//! - `dto.rs`: request/response DTOs and envelopes
//! - `errors.rs`: failure taxonomy rendered by the error middleware

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod validation;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The services should already be connected; requests against an unbound
/// accessor fail as internal faults.
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::error_normalizing))
            .layer(Extension(services)),
    )
}
