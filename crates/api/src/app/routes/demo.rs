//! Endpoints that fail on purpose, to exercise error reporting end to end.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use storefront_core::{DomainError, DomainResult};
use storefront_observability::Scope;

use crate::app::{errors, services::AppServices};

/// `GET /handled`: the error is caught and reported explicitly.
pub async fn handled(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(scope): Extension<Scope>,
) -> axum::response::Response {
    match add(&json!("2"), &json!(2)) {
        Ok(_) => (StatusCode::OK, "Success").into_response(),
        Err(e) => {
            let event_id = services.reporter.capture_error(&e, &scope);
            tracing::warn!(%event_id, error = %e, "handled error reported");
            errors::internal_error("handled error")
        }
    }
}

/// `GET /unhandled`: panics on a missing key and leaves reporting to the
/// request middleware.
pub async fn unhandled() -> Json<Value> {
    let obj: HashMap<&str, Value> = HashMap::new();
    Json(obj["keyDoesntExist"].clone())
}

/// `+` over JSON values: strings concatenate, numbers add, anything else is
/// a type mismatch.
fn add(lhs: &Value, rhs: &Value) -> DomainResult<Value> {
    match (lhs, rhs) {
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                if let Some(sum) = x.checked_add(y) {
                    return Ok(Value::from(sum));
                }
            }
            let sum = a.as_f64().unwrap_or(f64::NAN) + b.as_f64().unwrap_or(f64::NAN);
            Ok(serde_json::Number::from_f64(sum).map_or(Value::Null, Value::Number))
        }
        _ => Err(DomainError::TypeMismatch {
            op: "+",
            lhs: type_label(lhs),
            rhs: type_label(rhs),
        }),
    }
}

fn type_label(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_plus_number_is_a_type_mismatch() {
        let err = add(&json!("2"), &json!(2)).unwrap_err();
        assert_eq!(
            err,
            DomainError::TypeMismatch {
                op: "+",
                lhs: "string",
                rhs: "number",
            }
        );
    }

    #[test]
    fn like_types_combine() {
        assert_eq!(add(&json!("2"), &json!("2")).unwrap(), json!("22"));
        assert_eq!(add(&json!(2), &json!(2)).unwrap(), json!(4));
        assert_eq!(add(&json!(1.5), &json!(1)).unwrap(), json!(2.5));
    }
}
