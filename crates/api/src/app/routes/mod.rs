use axum::{
    routing::{get, post},
    Router,
};

pub mod checkout;
pub mod demo;
pub mod system;

/// Router for the storefront endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/handled", get(demo::handled))
        .route("/unhandled", get(demo::unhandled))
        .route("/checkout", post(checkout::checkout))
}
