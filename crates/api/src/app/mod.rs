//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared state (inventory store, error reporter)
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Router {
    build_app_with(services::build_services(config))
}

/// Build the router around already-constructed services.
///
/// Layer order, outermost first: tracing, CORS, panic-to-500, services,
/// request observation, handlers.
pub fn build_app_with(services: services::AppServices) -> Router {
    let services = Arc::new(services);

    routes::router()
        .route("/health", get(routes::system::health))
        .layer(axum::middleware::from_fn_with_state(
            services.clone(),
            middleware::observe_request,
        ))
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer())
                .layer(CatchPanicLayer::new()),
        )
}

/// Every origin, method and header is allowed.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
