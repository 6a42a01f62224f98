//! Request context captured for error reporting.
//!
//! Everything here is best-effort: a body that is not an order document, or
//! a missing header, just means less context. Nothing in this module can fail
//! a request.

use axum::http::HeaderMap;
use serde_json::Value;

use storefront_core::StockLevels;
use storefront_observability::{Scope, User};

pub const TRANSACTION_ID_HEADER: &str = "x-transaction-id";
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Tag value used when a correlation header is absent.
pub const UNKNOWN: &str = "unknown";

/// Upper bound on request bodies that are buffered or parsed.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Request extension set when the body could not be buffered; the body
/// handed on to the handler is then empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableBody(pub String);

/// Pull a user identity hint out of a request body.
///
/// Any JSON object counts as an order document; its `email` field becomes
/// the hint (see [`email_hint`]). Returns `None` for empty or non-object
/// bodies.
pub fn extract_user_hint(body: &[u8]) -> Option<User> {
    if body.is_empty() {
        return None;
    }

    let doc: Value = serde_json::from_slice(body).ok()?;
    let email = doc
        .as_object()?
        .get("email")
        .and_then(email_hint);

    Some(User::with_email(email))
}

/// Render an `email` value as sent: strings as-is, other JSON values in
/// their JSON form, `null` as nothing.
pub fn email_hint(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn header_or_unknown(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Build the request scope: user hint, correlation tags and a snapshot of the
/// stock table as it was when the request arrived.
pub fn enrich_scope(headers: &HeaderMap, body: &[u8], inventory: &StockLevels) -> Scope {
    let mut scope = Scope::new();

    if let Some(user) = extract_user_hint(body) {
        scope.set_user(user);
    }

    scope.set_tag("transaction_id", header_or_unknown(headers, TRANSACTION_ID_HEADER));
    scope.set_tag("session_id", header_or_unknown(headers, SESSION_ID_HEADER));

    let snapshot = serde_json::to_value(inventory).unwrap_or(Value::Null);
    scope.set_extra("inventory", snapshot);

    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;
    use storefront_core::ItemId;

    #[test]
    fn email_is_extracted_from_order_body() {
        let user = extract_user_hint(br#"{"email":"jane@example.com","cart":[]}"#).unwrap();
        assert_eq!(user.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn object_without_email_still_yields_a_hint() {
        let user = extract_user_hint(br#"{"cart":[]}"#).unwrap();
        assert_eq!(user.email, None);
    }

    #[test]
    fn non_string_email_keeps_its_json_rendering() {
        let user = extract_user_hint(br#"{"email":42}"#).unwrap();
        assert_eq!(user.email.as_deref(), Some("42"));

        let user = extract_user_hint(br#"{"email":{"addr":"a@b.c"}}"#).unwrap();
        assert_eq!(user.email.as_deref(), Some(r#"{"addr":"a@b.c"}"#));

        let user = extract_user_hint(br#"{"email":null}"#).unwrap();
        assert_eq!(user.email, None);
    }

    #[test]
    fn unparseable_or_non_object_bodies_are_ignored() {
        assert!(extract_user_hint(b"").is_none());
        assert!(extract_user_hint(b"{not json").is_none());
        assert!(extract_user_hint(b"[1,2,3]").is_none());
    }

    #[test]
    fn missing_headers_default_to_unknown() {
        let scope = enrich_scope(&HeaderMap::new(), b"", &StockLevels::new());

        assert_eq!(scope.tag("transaction_id"), Some(UNKNOWN));
        assert_eq!(scope.tag("session_id"), Some(UNKNOWN));
        assert!(scope.user().is_none());
    }

    #[test]
    fn headers_and_inventory_land_on_scope() {
        let mut headers = HeaderMap::new();
        headers.insert(TRANSACTION_ID_HEADER, HeaderValue::from_static("tx-42"));
        headers.insert(SESSION_ID_HEADER, HeaderValue::from_static("sess-7"));
        let inventory = StockLevels::from([(ItemId::from("wrench"), 1), (ItemId::from("nails"), 0)]);

        let scope = enrich_scope(&headers, br#"{"email":"a@b.c"}"#, &inventory);

        assert_eq!(scope.tag("transaction_id"), Some("tx-42"));
        assert_eq!(scope.tag("session_id"), Some("sess-7"));
        assert_eq!(
            scope.extra().get("inventory"),
            Some(&json!({"nails": 0, "wrench": 1}))
        );
        assert_eq!(
            scope.user().and_then(|u| u.email.as_deref()),
            Some("a@b.c")
        );
    }
}
