//! Shopify Admin API adapter.
//!
//! Speaks the 2024-01 Admin REST API. Product listings expose stock as a
//! variant-level `inventory_quantity` (on-hand signal); per-item stock
//! reads and writes go through the `inventory_levels` API, with writes
//! scoped to a configured location.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use shopsync_core::credentials::{PlatformType, ShopifyCredentials};
use shopsync_core::stock::StockSignal;
use shopsync_core::webhook::{normalize_order, NormalizedOrder};

use crate::error::AdapterError;
use crate::http::send_json;
use crate::types::{InventoryTarget, ProductSnapshot};
use crate::PlatformAdapter;

/// Admin API version all requests are pinned to.
const API_VERSION: &str = "2024-01";

/// Access-token header name.
const TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Adapter for one connected Shopify store.
pub struct ShopifyAdapter {
    client: Client,
    credentials: ShopifyCredentials,
    base_url: String,
}

impl ShopifyAdapter {
    /// Create an adapter from decoded credentials and the registry's
    /// shared HTTP client.
    pub fn new(client: Client, credentials: ShopifyCredentials) -> Self {
        let base_url = format!(
            "https://{}.myshopify.com/admin/api/{API_VERSION}",
            credentials.shop_domain
        );
        Self {
            client,
            credentials,
            base_url,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .header(TOKEN_HEADER, &self.credentials.access_token)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base_url))
            .header(TOKEN_HEADER, &self.credentials.access_token)
    }

    /// Flatten one raw product into a snapshot.
    ///
    /// SKU and inventory references come from the first variant, which is
    /// where single-variant stores keep them.
    fn snapshot_from_product(product: &Value) -> Option<ProductSnapshot> {
        let external_product_id = scalar_string(product.get("id"))?;
        let name = product
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let first_variant = product
            .get("variants")
            .and_then(Value::as_array)
            .and_then(|v| v.first());

        let sku = first_variant
            .and_then(|v| v.get("sku"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let external_variant_id =
            first_variant.and_then(|v| scalar_string(v.get("id")));
        let external_inventory_item_id =
            first_variant.and_then(|v| scalar_string(v.get("inventory_item_id")));

        let on_hand = first_variant
            .and_then(|v| v.get("inventory_quantity"))
            .and_then(Value::as_i64);

        Some(ProductSnapshot {
            sku,
            name,
            external_product_id,
            external_variant_id,
            external_inventory_item_id,
            stock: StockSignal {
                available: None,
                on_hand,
            },
        })
    }
}

#[async_trait]
impl PlatformAdapter for ShopifyAdapter {
    fn platform_type(&self) -> PlatformType {
        PlatformType::Shopify
    }

    async fn list_products(&self, page_size: u32) -> Result<Vec<ProductSnapshot>, AdapterError> {
        let body = send_json(
            self.get("/products.json")
                .query(&[("limit", page_size.to_string())]),
        )
        .await?;

        let products = body
            .get("products")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            shop_domain = %self.credentials.shop_domain,
            count = products.len(),
            "Listed Shopify products"
        );

        Ok(products
            .iter()
            .filter_map(Self::snapshot_from_product)
            .collect())
    }

    async fn get_stock(&self, target: &InventoryTarget) -> Result<i64, AdapterError> {
        let inventory_item_id = inventory_item_ref(target)?;

        let mut query = vec![("inventory_item_ids", inventory_item_id.to_string())];
        // Scope to the configured location when one is set; otherwise the
        // read is the sum across all of the store's locations.
        if let Some(location_id) = self.credentials.location_id.as_deref() {
            query.push(("location_ids", location_id.to_string()));
        }
        let body = send_json(self.get("/inventory_levels.json").query(&query)).await?;

        let available: i64 = body
            .get("inventory_levels")
            .and_then(Value::as_array)
            .map(|levels| {
                levels
                    .iter()
                    .filter_map(|level| level.get("available").and_then(Value::as_i64))
                    .sum()
            })
            .unwrap_or(0);

        tracing::debug!(
            shop_domain = %self.credentials.shop_domain,
            inventory_item_id,
            available,
            "Read Shopify inventory level"
        );
        Ok(available)
    }

    async fn set_stock(
        &self,
        target: &InventoryTarget,
        quantity: i64,
    ) -> Result<(), AdapterError> {
        let location_id = self
            .credentials
            .location_id
            .as_deref()
            .ok_or(AdapterError::MissingLocation)?;

        let inventory_item_id = inventory_item_ref(target)?;

        send_json(self.post("/inventory_levels/set.json").json(&json!({
            "location_id": location_id,
            "inventory_item_id": inventory_item_id,
            "available": quantity,
        })))
        .await?;

        tracing::debug!(
            shop_domain = %self.credentials.shop_domain,
            inventory_item_id,
            quantity,
            "Set Shopify inventory level"
        );
        Ok(())
    }

    async fn list_orders(&self, page_size: u32) -> Result<Vec<NormalizedOrder>, AdapterError> {
        let body = send_json(self.get("/orders.json").query(&[
            ("limit", page_size.to_string()),
            ("status", "any".to_string()),
        ]))
        .await?;

        let orders = body
            .get("orders")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(orders
            .iter()
            .filter_map(|raw| normalize_order(raw).ok())
            .collect())
    }
}

/// The inventory-item reference stock calls are addressed by.
fn inventory_item_ref(target: &InventoryTarget) -> Result<&str, AdapterError> {
    target.external_inventory_item_id.as_deref().ok_or_else(|| {
        AdapterError::NotFound(format!(
            "Product {} has no inventory item reference",
            target.external_product_id
        ))
    })
}

/// Render a string or numeric id as a string.
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
