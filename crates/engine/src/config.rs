//! Engine configuration loaded from environment variables.

use std::time::Duration;

/// Tunables for the reconciliation engine.
///
/// All fields have defaults suitable for the documented platform rate
/// limits; override via environment variables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum in-flight stock writes per target platform.
    pub write_concurrency: usize,
    /// Page size requested from adapter product listings.
    pub page_size: u32,
    /// Per-call timeout applied to every adapter request.
    pub adapter_timeout: Duration,
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default |
    /// |-------------------------|---------|
    /// | `SYNC_WRITE_CONCURRENCY`| `6`     |
    /// | `SYNC_PAGE_SIZE`        | `100`   |
    /// | `ADAPTER_TIMEOUT_SECS`  | `15`    |
    pub fn from_env() -> Self {
        let write_concurrency: usize = std::env::var("SYNC_WRITE_CONCURRENCY")
            .unwrap_or_else(|_| "6".into())
            .parse()
            .expect("SYNC_WRITE_CONCURRENCY must be a valid usize");

        let page_size: u32 = std::env::var("SYNC_PAGE_SIZE")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("SYNC_PAGE_SIZE must be a valid u32");

        let adapter_timeout_secs: u64 = std::env::var("ADAPTER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("ADAPTER_TIMEOUT_SECS must be a valid u64");

        Self {
            write_concurrency: write_concurrency.max(1),
            page_size,
            adapter_timeout: Duration::from_secs(adapter_timeout_secs),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            write_concurrency: 6,
            page_size: 100,
            adapter_timeout: Duration::from_secs(15),
        }
    }
}
