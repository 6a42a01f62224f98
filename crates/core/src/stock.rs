//! Stock counts.

use std::collections::BTreeMap;

use crate::id::ItemId;

/// Remaining units of an item.
///
/// Signed on purpose: seeded levels are not validated, so a negative count is
/// representable and is treated like an empty shelf.
pub type Stock = i64;

/// Full stock table, keyed by item id.
///
/// Ordered so snapshots render deterministically in logs and reports.
pub type StockLevels = BTreeMap<ItemId, Stock>;
