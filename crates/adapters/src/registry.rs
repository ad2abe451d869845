//! Closed adapter dispatch.
//!
//! The registry turns a decoded credential bundle into the matching
//! adapter. This is the only place platform types fan out; the engine
//! works purely against `dyn PlatformAdapter`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use shopsync_core::credentials::PlatformCredentials;

use crate::http::{build_client, DEFAULT_TIMEOUT};
use crate::shopify::ShopifyAdapter;
use crate::woocommerce::WooCommerceAdapter;
use crate::PlatformAdapter;

/// Constructs adapters over a shared HTTP client with a uniform per-call
/// timeout.
#[derive(Clone)]
pub struct AdapterRegistry {
    client: Client,
}

impl AdapterRegistry {
    /// Create a registry whose adapters use the given per-call timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
        }
    }

    /// The adapter for a decoded credential bundle.
    pub fn for_credentials(&self, credentials: PlatformCredentials) -> Arc<dyn PlatformAdapter> {
        match credentials {
            PlatformCredentials::Shopify(creds) => {
                Arc::new(ShopifyAdapter::new(self.client.clone(), creds))
            }
            PlatformCredentials::WooCommerce(creds) => {
                Arc::new(WooCommerceAdapter::new(self.client.clone(), creds))
            }
        }
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

/// Source of live adapters for decoded credentials.
///
/// [`AdapterRegistry`] is the production implementation. The engine works
/// against this trait rather than the registry directly, so tests can
/// substitute scripted adapters without any network.
pub trait AdapterFactory: Send + Sync {
    /// The adapter for a decoded credential bundle.
    fn for_credentials(&self, credentials: PlatformCredentials) -> Arc<dyn PlatformAdapter>;
}

impl AdapterFactory for AdapterRegistry {
    fn for_credentials(&self, credentials: PlatformCredentials) -> Arc<dyn PlatformAdapter> {
        AdapterRegistry::for_credentials(self, credentials)
    }
}
