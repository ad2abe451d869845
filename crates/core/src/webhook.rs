//! Webhook topic routing and payload normalization.
//!
//! Vendors push differently-shaped JSON for the same underlying change.
//! This module maps a delivery's topic/action to one of three routes and
//! flattens the vendor order payload into [`NormalizedOrder`], the only
//! order shape the ingestor writes.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::credentials::PlatformType;
use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// What to do with an inbound webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookRoute {
    /// Upsert the order snapshot keyed on `(platform_id, platform_order_id)`.
    OrderUpsert,
    /// The platform's inventory may be stale; trigger reconciliation.
    /// The event itself carries no authoritative quantity to write.
    InventoryChanged,
    /// A topic this system does not act on. Still stored for audit.
    Ignored,
}

/// Map a delivery's topic to a route.
///
/// Shopify sends a topic header (`orders/create`, `inventory_levels/update`);
/// WooCommerce sends an action plus a resource name in the payload
/// (`created` + `order`, `updated` + `product`).
pub fn route_topic(platform_type: PlatformType, topic: &str, resource: Option<&str>) -> WebhookRoute {
    match platform_type {
        PlatformType::Shopify => match topic {
            "orders/create" | "orders/updated" => WebhookRoute::OrderUpsert,
            "inventory_levels/update" => WebhookRoute::InventoryChanged,
            _ => WebhookRoute::Ignored,
        },
        PlatformType::Woocommerce => match (topic, resource) {
            ("created", Some("order")) | ("updated", Some("order")) => WebhookRoute::OrderUpsert,
            ("updated", Some("product")) => WebhookRoute::InventoryChanged,
            _ => WebhookRoute::Ignored,
        },
    }
}

// ---------------------------------------------------------------------------
// Order normalization
// ---------------------------------------------------------------------------

/// Vendor-neutral order snapshot extracted from a webhook payload.
#[derive(Debug, Clone)]
pub struct NormalizedOrder {
    /// The platform's own order identifier, as a string.
    pub platform_order_id: String,
    pub order_number: String,
    pub status: String,
    pub total: Decimal,
    pub currency: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub shipping_address: Value,
    pub line_items: Value,
    pub payment_status: String,
    /// The vendor's own last-modified timestamp, when present. Used as a
    /// monotonic guard against out-of-order deliveries.
    pub platform_updated_at: Option<Timestamp>,
}

/// Extract a [`NormalizedOrder`] from a vendor webhook payload.
///
/// Handles both wrapped (`{"order": {...}}`) and bare order objects.
/// Field preferences:
/// - order number: explicit `order_number`/`number`, else the numeric
///   platform id rendered as a string;
/// - status: `financial_status` (Shopify), else `status`, else `pending`;
/// - total: `total` (WooCommerce) or `total_price` (Shopify) parsed as
///   fixed-point decimal, else 0;
/// - currency: `currency`, else `USD`.
pub fn normalize_order(payload: &Value) -> Result<NormalizedOrder, CoreError> {
    let order = payload.get("order").unwrap_or(payload);

    let platform_order_id = scalar_to_string(order.get("id")).ok_or_else(|| {
        CoreError::Validation("Order payload has no id field".to_string())
    })?;

    let order_number = scalar_to_string(order.get("order_number"))
        .or_else(|| scalar_to_string(order.get("number")))
        .unwrap_or_else(|| platform_order_id.clone());

    let status = string_field(order, "financial_status")
        .or_else(|| string_field(order, "status"))
        .unwrap_or_else(|| "pending".to_string());

    let total = parse_decimal(order.get("total"))
        .or_else(|| parse_decimal(order.get("total_price")))
        .unwrap_or(Decimal::ZERO);

    let currency = string_field(order, "currency").unwrap_or_else(|| "USD".to_string());

    let customer_email = string_field(order, "email")
        .or_else(|| nested_string(order, "customer", "email"))
        .or_else(|| nested_string(order, "billing", "email"));

    let customer_name = nested_string(order, "customer", "first_name")
        .or_else(|| nested_string(order, "billing", "first_name"));

    let shipping_address = order
        .get("shipping_address")
        .or_else(|| order.get("shipping"))
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));

    let line_items = order
        .get("line_items")
        .or_else(|| order.get("items"))
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));

    let payment_status = string_field(order, "financial_status")
        .or_else(|| string_field(order, "payment_status"))
        .unwrap_or_else(|| "pending".to_string());

    let platform_updated_at = string_field(order, "updated_at")
        .or_else(|| string_field(order, "date_modified_gmt"))
        .and_then(|s| parse_timestamp(&s));

    Ok(NormalizedOrder {
        platform_order_id,
        order_number,
        status,
        total,
        currency,
        customer_email,
        customer_name,
        shipping_address,
        line_items,
        payment_status,
        platform_updated_at,
    })
}

// ---------------------------------------------------------------------------
// Field extraction helpers
// ---------------------------------------------------------------------------

/// Render a string or numeric JSON scalar as a string.
fn scalar_to_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A non-empty string field.
fn string_field(obj: &Value, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// A non-empty string field nested one object deep.
fn nested_string(obj: &Value, outer: &str, inner: &str) -> Option<String> {
    string_field(obj.get(outer)?, inner)
}

/// Parse a JSON string or number into a fixed-point decimal.
///
/// Monetary totals arrive as strings from both Shopify (`"19.99"`) and
/// WooCommerce; numbers are tolerated for robustness.
fn parse_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

/// Parse an RFC 3339 timestamp (both vendors emit this shape), tolerating
/// a bare `YYYY-MM-DDTHH:MM:SS` without offset (WooCommerce GMT fields).
fn parse_timestamp(s: &str) -> Option<Timestamp> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&chrono::Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
