//! Typed credential bundles per platform type.
//!
//! Credentials are stored as an opaque JSON blob on the platform row and
//! decoded exactly once at platform load into a tagged union. Nothing
//! downstream of the registry ever touches the raw JSON shape.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Platform type
// ---------------------------------------------------------------------------

/// The closed set of supported platform types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Shopify,
    Woocommerce,
}

impl PlatformType {
    /// Database representation. Matches the `platforms.platform_type`
    /// CHECK set.
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformType::Shopify => "shopify",
            PlatformType::Woocommerce => "woocommerce",
        }
    }

    /// Parse the database representation.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "shopify" => Ok(PlatformType::Shopify),
            "woocommerce" => Ok(PlatformType::Woocommerce),
            other => Err(CoreError::Validation(format!(
                "Unknown platform type: {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Credential bundles
// ---------------------------------------------------------------------------

/// Shopify Admin API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyCredentials {
    /// Shop subdomain, e.g. `acme` for `acme.myshopify.com`.
    pub shop_domain: String,
    /// Admin API access token.
    pub access_token: String,
    /// Inventory location to write stock levels to. Writes fail per-item
    /// with `missing-location` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

/// WooCommerce REST API credentials (basic auth key pair).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WooCommerceCredentials {
    /// Store base URL, e.g. `https://shop.example.com`.
    pub store_url: String,
    pub consumer_key: String,
    pub consumer_secret: String,
}

/// Decoded credential bundle for one connected platform.
#[derive(Debug, Clone)]
pub enum PlatformCredentials {
    Shopify(ShopifyCredentials),
    WooCommerce(WooCommerceCredentials),
}

impl PlatformCredentials {
    /// Decode the stored JSON blob for a platform of the given type.
    pub fn decode(
        platform_type: PlatformType,
        raw: &serde_json::Value,
    ) -> Result<Self, CoreError> {
        match platform_type {
            PlatformType::Shopify => serde_json::from_value(raw.clone())
                .map(PlatformCredentials::Shopify)
                .map_err(|e| {
                    CoreError::Validation(format!("Invalid Shopify credentials: {e}"))
                }),
            PlatformType::Woocommerce => serde_json::from_value(raw.clone())
                .map(PlatformCredentials::WooCommerce)
                .map_err(|e| {
                    CoreError::Validation(format!("Invalid WooCommerce credentials: {e}"))
                }),
        }
    }

    /// The platform type this bundle belongs to.
    pub fn platform_type(&self) -> PlatformType {
        match self {
            PlatformCredentials::Shopify(_) => PlatformType::Shopify,
            PlatformCredentials::WooCommerce(_) => PlatformType::Woocommerce,
        }
    }
}
