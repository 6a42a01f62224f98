use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, HeaderMap},
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;

use crate::app::services::AppServices;
use crate::context::{enrich_scope, UnreadableBody, MAX_BODY_BYTES};

/// Runs in front of every route.
///
/// Buffers the body (when it fits under [`MAX_BODY_BYTES`]), builds the
/// request [`Scope`](storefront_observability::Scope) and stores it in request
/// extensions for handlers. Enrichment never decides the response: a body
/// that is too large or unreadable only costs the user hint. A handler panic
/// is captured with the scope and then resumed, so the outer panic layer
/// still produces the 500.
pub async fn observe_request(
    State(services): State<Arc<AppServices>>,
    req: Request,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();

    let (buffered, body, unreadable) = if declared_len(&parts.headers) > Some(MAX_BODY_BYTES) {
        // Left for the handler to deal with.
        (Bytes::new(), body, None)
    } else {
        match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
            Ok(b) => (b.clone(), Body::from(b), None),
            Err(e) => {
                tracing::warn!("failed to buffer request body: {e}");
                (Bytes::new(), Body::empty(), Some(UnreadableBody(e.to_string())))
            }
        }
    };

    let scope = enrich_scope(&parts.headers, &buffered, &services.inventory.snapshot());

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(scope.clone());
    if let Some(u) = unreadable {
        req.extensions_mut().insert(u);
    }

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(res) => res,
        Err(payload) => {
            let event_id = services.reporter.capture_panic(&*payload, &scope);
            tracing::error!(%event_id, "request handler panicked");
            std::panic::resume_unwind(payload)
        }
    }
}

fn declared_len(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
