//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant ends up at the HTTP boundary as a generic server error; the
/// detail only travels to the error-reporting sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A cart line asked for an item with no remaining stock (or an unknown item).
    #[error("not enough inventory for {0}")]
    InsufficientStock(ItemId),

    /// The request body was not a valid order document.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Two operands of incompatible types were combined.
    #[error("unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
}

impl DomainError {
    pub fn insufficient_stock(item_id: impl Into<ItemId>) -> Self {
        Self::InsufficientStock(item_id.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    /// Stable machine-readable code, used as a tag on reported errors.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InsufficientStock(_) => "insufficient_stock",
            DomainError::MalformedRequest(_) => "malformed_request",
            DomainError::TypeMismatch { .. } => "type_mismatch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_the_item() {
        let err = DomainError::insufficient_stock("wrench");
        assert_eq!(err.to_string(), "not enough inventory for wrench");
        assert_eq!(err.code(), "insufficient_stock");
    }

    #[test]
    fn type_mismatch_message_names_both_operands() {
        let err = DomainError::TypeMismatch {
            op: "+",
            lhs: "str",
            rhs: "int",
        };
        assert_eq!(
            err.to_string(),
            "unsupported operand type(s) for +: 'str' and 'int'"
        );
    }
}
