//! URL Reputation API
//!
//! Thin HTTP surface over the Google Safe Browsing v4 lookup API:
//! a client submits a URL, the service normalizes it, forwards it to
//! the provider inside a bounded deadline, and relays a safe/unsafe
//! verdict with any provider-reported threat matches attached.

pub mod config;
pub mod deadline;
pub mod error;
pub mod gateway;
pub mod models;
pub mod normalize;
pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::gateway::SafeBrowsingGateway;

/// Shared per-process state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the threat-intelligence provider.
    pub gateway: SafeBrowsingGateway,
}

/// Build the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health::health_check))
        .nest("/api", routes::check::router())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
