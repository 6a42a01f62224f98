//! Inventory domain module.
//!
//! This crate contains the stock table and the order processor, implemented
//! as plain domain logic (no HTTP, no storage).

pub mod order;
pub mod store;

pub use order::{process_order, CartItem, LineOutcome, Order, ProcessedOrder};
pub use store::InventoryStore;
