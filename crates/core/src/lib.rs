//! `storefront-core` — shared building blocks for the storefront crates.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP).

pub mod error;
pub mod id;
pub mod stock;

pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use stock::{Stock, StockLevels};
