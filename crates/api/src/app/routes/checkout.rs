use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use storefront_core::{DomainError, DomainResult};
use storefront_inventory::{LineOutcome, Order};
use storefront_observability::Scope;

use crate::app::{errors, services::AppServices};
use crate::context::{email_hint, UnreadableBody, MAX_BODY_BYTES};

/// `POST /checkout`
///
/// Responds `200 Success` when the whole cart was fulfilled. Any failure
/// (unreadable or unparseable body, insufficient stock) is reported with the
/// raw body attached and answered with a generic 500.
pub async fn checkout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(scope): Extension<Scope>,
    unreadable: Option<Extension<UnreadableBody>>,
    body: Body,
) -> axum::response::Response {
    let body = match unreadable {
        Some(Extension(UnreadableBody(reason))) => Err(reason),
        None => axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| e.to_string()),
    };

    let result = match &body {
        Ok(bytes) => place_order(&services, bytes),
        Err(reason) => Err(DomainError::malformed(format!(
            "unreadable request body: {reason}"
        ))),
    };

    match result {
        Ok(lines) => {
            tracing::info!(lines = lines.len(), "order fulfilled");
            (StatusCode::OK, "Success").into_response()
        }
        Err(e) => {
            let raw = body.unwrap_or_else(|_| Bytes::new());
            let mut scope = scope;
            scope.set_tag("error_code", e.code());
            scope.set_extra(
                "request_data",
                Value::String(String::from_utf8_lossy(&raw).into_owned()),
            );
            let event_id = services.reporter.capture_error(&e, &scope);
            tracing::warn!(%event_id, error = %e, "checkout failed");
            errors::internal_error("checkout failed")
        }
    }
}

fn place_order(services: &AppServices, body: &[u8]) -> DomainResult<Vec<LineOutcome>> {
    let order = Order::from_json(body)?;
    let email = order.email.as_ref().and_then(email_hint);
    tracing::info!(
        email = email.as_deref().unwrap_or(""),
        lines = order.cart.len(),
        "processing order"
    );
    services.inventory.checkout(&order.cart)
}
