//! Platform adapters.
//!
//! Each adapter normalizes one external platform's product/inventory/
//! order API into the uniform [`PlatformAdapter`] capability set the
//! reconciliation engine consumes. Vendor wire formats stop at this
//! crate's boundary.
//!
//! Adding a platform type means adding one adapter module and one arm in
//! [`registry::AdapterRegistry::for_credentials`] — the engine is never
//! touched.

pub mod error;
pub mod http;
pub mod registry;
pub mod shopify;
pub mod types;
pub mod woocommerce;

pub use error::AdapterError;
pub use registry::{AdapterFactory, AdapterRegistry};
pub use shopify::ShopifyAdapter;
pub use types::{InventoryTarget, ProductSnapshot};
pub use woocommerce::WooCommerceAdapter;

use async_trait::async_trait;
use shopsync_core::credentials::PlatformType;
use shopsync_core::webhook::NormalizedOrder;

/// Uniform capability set over one external platform.
///
/// Every method that touches the network carries the registry's per-call
/// timeout; exceeding it surfaces as [`AdapterError::Transport`].
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Which platform type this adapter speaks to.
    fn platform_type(&self) -> PlatformType;

    /// Current product listing, bounded by the platform's pagination.
    /// Finite, restartable from page 1 (not resumable mid-page).
    async fn list_products(&self, page_size: u32) -> Result<Vec<ProductSnapshot>, AdapterError>;

    /// Read the current absolute stock quantity for one inventory
    /// reference. Unmanaged stock reads as zero.
    async fn get_stock(&self, target: &InventoryTarget) -> Result<i64, AdapterError>;

    /// Write an absolute stock quantity for one inventory reference.
    /// Quantity is non-negative; writes are idempotent, not deltas.
    async fn set_stock(&self, target: &InventoryTarget, quantity: i64)
        -> Result<(), AdapterError>;

    /// Recent orders, normalized to the vendor-neutral order shape.
    async fn list_orders(&self, page_size: u32) -> Result<Vec<NormalizedOrder>, AdapterError>;

    /// Minimal live-API call used as a connect-test before persisting
    /// credentials.
    async fn connect_test(&self) -> Result<(), AdapterError> {
        self.list_products(1).await.map(|_| ())
    }

    /// Verify an inbound webhook signature over the exact raw bytes.
    /// Returns `false` on any mismatch or missing secret, never errors.
    fn verify_webhook(&self, raw_body: &[u8], signature_header: &str, secret: &str) -> bool {
        shopsync_core::signature::verify_hmac_base64(secret, raw_body, signature_header)
    }
}
