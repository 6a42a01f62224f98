//! Strongly-typed identifiers used across the domain.

use core::borrow::Borrow;
use serde::{Deserialize, Serialize};

/// Identifier of a stocked item (e.g. `"wrench"`).
///
/// Item ids are free-form strings chosen by whoever seeds the inventory; no
/// format is enforced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_serializes_as_plain_string() {
        let id = ItemId::from("nails");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"nails\"");

        let back: ItemId = serde_json::from_str("\"nails\"").unwrap();
        assert_eq!(back, id);
    }
}
