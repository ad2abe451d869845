//! Normalized DTOs at the adapter boundary.
//!
//! The engine only ever sees these shapes; vendor JSON never crosses
//! this crate.

use serde::{Deserialize, Serialize};

use shopsync_core::stock::StockSignal;

/// One product as reported by a source platform's listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Merchant SKU. Absent when the platform listing carries no SKU for
    /// the item; such items cannot be matched and fail per-item.
    pub sku: Option<String>,
    pub name: String,
    /// The platform's own product identifier.
    pub external_product_id: String,
    pub external_variant_id: Option<String>,
    /// Inventory-item reference for location-scoped APIs (Shopify).
    pub external_inventory_item_id: Option<String>,
    /// Raw quantity signals; the engine resolves the authoritative value.
    pub stock: StockSignal,
}

/// Addressing information for one stock write on a target platform.
///
/// Built from a Product-Platform Link; which field a given adapter uses
/// is adapter-private.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryTarget {
    pub external_product_id: String,
    pub external_variant_id: Option<String>,
    pub external_inventory_item_id: Option<String>,
}
