//! WooCommerce REST API adapter.
//!
//! Speaks the `wc/v3` REST API with basic-auth consumer keys. Stock
//! lives directly on the product as `stock_quantity` (explicit available
//! signal); listings are fetched page by page until a short page.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};

use shopsync_core::credentials::{PlatformType, WooCommerceCredentials};
use shopsync_core::stock::StockSignal;
use shopsync_core::webhook::{normalize_order, NormalizedOrder};

use crate::error::AdapterError;
use crate::http::send_json;
use crate::types::{InventoryTarget, ProductSnapshot};
use crate::PlatformAdapter;

/// Hard ceiling on pages fetched per listing, guarding against a
/// misbehaving store that keeps returning full pages.
const MAX_PAGES: u32 = 50;

/// Adapter for one connected WooCommerce store.
pub struct WooCommerceAdapter {
    client: Client,
    base_url: String,
    auth_header: String,
    store_url: String,
}

impl WooCommerceAdapter {
    /// Create an adapter from decoded credentials and the registry's
    /// shared HTTP client.
    pub fn new(client: Client, credentials: WooCommerceCredentials) -> Self {
        let store_url = credentials.store_url.trim_end_matches('/').to_string();
        let base_url = format!("{store_url}/wp-json/wc/v3");
        let auth = STANDARD.encode(format!(
            "{}:{}",
            credentials.consumer_key, credentials.consumer_secret
        ));
        Self {
            client,
            base_url,
            auth_header: format!("Basic {auth}"),
            store_url,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
    }

    /// Flatten one raw product into a snapshot.
    fn snapshot_from_product(product: &Value) -> Option<ProductSnapshot> {
        let external_product_id = scalar_string(product.get("id"))?;
        let name = product
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let sku = product
            .get("sku")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let available = product.get("stock_quantity").and_then(Value::as_i64);

        Some(ProductSnapshot {
            sku,
            name,
            external_product_id,
            external_variant_id: None,
            external_inventory_item_id: None,
            stock: StockSignal {
                available,
                on_hand: None,
            },
        })
    }
}

#[async_trait]
impl PlatformAdapter for WooCommerceAdapter {
    fn platform_type(&self) -> PlatformType {
        PlatformType::Woocommerce
    }

    async fn list_products(&self, page_size: u32) -> Result<Vec<ProductSnapshot>, AdapterError> {
        let mut snapshots = Vec::new();

        for page in 1..=MAX_PAGES {
            let body = send_json(self.request(reqwest::Method::GET, "/products").query(&[
                ("per_page", page_size.to_string()),
                ("page", page.to_string()),
            ]))
            .await?;

            let products = body.as_array().cloned().unwrap_or_default();
            let page_len = products.len();
            snapshots.extend(products.iter().filter_map(Self::snapshot_from_product));

            // A short page means the listing is exhausted.
            if page_len < page_size as usize {
                break;
            }
        }

        tracing::debug!(
            store_url = %self.store_url,
            count = snapshots.len(),
            "Listed WooCommerce products"
        );
        Ok(snapshots)
    }

    async fn get_stock(&self, target: &InventoryTarget) -> Result<i64, AdapterError> {
        let path = format!("/products/{}", target.external_product_id);
        let body = send_json(self.request(reqwest::Method::GET, &path)).await?;

        // `stock_quantity` is null for products with stock management
        // turned off; those read as zero.
        Ok(body
            .get("stock_quantity")
            .and_then(Value::as_i64)
            .unwrap_or(0))
    }

    async fn set_stock(
        &self,
        target: &InventoryTarget,
        quantity: i64,
    ) -> Result<(), AdapterError> {
        let path = format!("/products/{}", target.external_product_id);
        send_json(
            self.request(reqwest::Method::PUT, &path).json(&json!({
                "manage_stock": true,
                "stock_quantity": quantity,
            })),
        )
        .await?;

        tracing::debug!(
            store_url = %self.store_url,
            product_id = %target.external_product_id,
            quantity,
            "Set WooCommerce product stock"
        );
        Ok(())
    }

    async fn list_orders(&self, page_size: u32) -> Result<Vec<NormalizedOrder>, AdapterError> {
        let body = send_json(self.request(reqwest::Method::GET, "/orders").query(&[
            ("per_page", page_size.to_string()),
            ("page", "1".to_string()),
        ]))
        .await?;

        let orders = body.as_array().cloned().unwrap_or_default();
        Ok(orders
            .iter()
            .filter_map(|raw| normalize_order(raw).ok())
            .collect())
    }
}

/// Render a string or numeric id as a string.
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{build_client, DEFAULT_TIMEOUT};

    fn adapter(store_url: &str) -> WooCommerceAdapter {
        WooCommerceAdapter::new(
            build_client(DEFAULT_TIMEOUT),
            WooCommerceCredentials {
                store_url: store_url.to_string(),
                consumer_key: "ck_test".to_string(),
                consumer_secret: "cs_test".to_string(),
            },
        )
    }

    #[test]
    fn trailing_slash_is_stripped_from_store_url() {
        let a = adapter("https://shop.example.com/");
        assert_eq!(a.base_url, "https://shop.example.com/wp-json/wc/v3");
    }

    #[test]
    fn snapshot_uses_explicit_stock_quantity() {
        let product = serde_json::json!({
            "id": 794,
            "name": "Premium Quality",
            "sku": "WOO-1",
            "stock_quantity": 8
        });
        let snap = WooCommerceAdapter::snapshot_from_product(&product).unwrap();
        assert_eq!(snap.sku.as_deref(), Some("WOO-1"));
        assert_eq!(snap.external_product_id, "794");
        assert_eq!(snap.stock.available, Some(8));
        assert_eq!(snap.stock.on_hand, None);
    }

    #[test]
    fn empty_sku_becomes_none() {
        let product = serde_json::json!({ "id": 1, "name": "No SKU", "sku": "" });
        let snap = WooCommerceAdapter::snapshot_from_product(&product).unwrap();
        assert!(snap.sku.is_none());
    }

    #[test]
    fn unmanaged_stock_has_no_signal() {
        let product = serde_json::json!({
            "id": 2,
            "name": "Unmanaged",
            "sku": "X",
            "stock_quantity": null
        });
        let snap = WooCommerceAdapter::snapshot_from_product(&product).unwrap();
        assert_eq!(snap.stock.available, None);
    }
}
