use std::sync::{PoisonError, RwLock};

use storefront_core::{DomainResult, ItemId, Stock, StockLevels};

use crate::order::{process_order, CartItem, LineOutcome};

/// Process-wide stock table.
///
/// Constructed once at startup and shared as `Arc<InventoryStore>`. Updates
/// always swap the whole table; there is no per-item write API.
#[derive(Debug)]
pub struct InventoryStore {
    inner: RwLock<StockLevels>,
}

impl InventoryStore {
    pub fn new(levels: StockLevels) -> Self {
        Self {
            inner: RwLock::new(levels),
        }
    }

    /// One of each: wrench, nails, hammer.
    pub fn with_default_seed() -> Self {
        Self::new(StockLevels::from([
            (ItemId::from("wrench"), 1),
            (ItemId::from("nails"), 1),
            (ItemId::from("hammer"), 1),
        ]))
    }

    /// Remaining units of `id`; unknown items have none.
    pub fn get(&self, id: &ItemId) -> Stock {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(id).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> StockLevels {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a complete new table (not merged with the old one).
    pub fn replace(&self, levels: StockLevels) {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *map = levels;
    }

    /// Fulfil `cart` and commit the resulting table.
    ///
    /// Read, compute and replace happen under one write lock, so two
    /// concurrent checkouts can never both consume the same unit. On failure
    /// the table is left exactly as it was.
    pub fn checkout(&self, cart: &[CartItem]) -> DomainResult<Vec<LineOutcome>> {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let processed = match process_order(&map, cart) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %e, lines = cart.len(), "order rejected");
                return Err(e);
            }
        };
        *map = processed.levels;
        drop(map);

        for line in &processed.lines {
            tracing::info!(
                item_id = %line.item_id,
                remaining = line.remaining,
                "item purchased"
            );
        }

        Ok(processed.lines)
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::with_default_seed()
    }
}
