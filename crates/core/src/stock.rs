//! Source-of-truth stock quantity rule.
//!
//! A source platform may report inventory in more than one place. The
//! engine resolves a single authoritative quantity per item:
//!
//! 1. an explicit available-inventory figure, if the platform reports one;
//! 2. otherwise a variant-level on-hand count;
//! 3. otherwise 0 — absence of any signal means "out of stock", never
//!    "skip this item".

use serde::{Deserialize, Serialize};

/// Raw quantity signals reported by a source platform for one item.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StockSignal {
    /// Explicit available-inventory figure (e.g. WooCommerce
    /// `stock_quantity`, Shopify inventory level `available`).
    pub available: Option<i64>,
    /// Variant-level on-hand count (e.g. Shopify `inventory_quantity`).
    pub on_hand: Option<i64>,
}

/// Resolve the authoritative quantity for a stock signal.
///
/// Negative platform-reported values (some platforms report oversold
/// stock below zero) clamp to 0 so downstream writes stay non-negative.
pub fn resolve_quantity(signal: StockSignal) -> i64 {
    signal
        .available
        .or(signal.on_hand)
        .unwrap_or(0)
        .max(0)
}
