//! Engine error type.
//!
//! Item-level adapter failures never surface here — they are folded into
//! the batch tally. `EngineError` covers faults that abort an operation:
//! platform resolution, the listing call, ledger writes, and rejected
//! webhook signatures.

use shopsync_adapters::AdapterError;
use shopsync_core::CoreError;

/// Error from a reconciliation or ingestion operation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A domain-level error (not-found, validation, insufficient
    /// platforms).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A platform-level adapter fault outside the per-item loop
    /// (typically the source listing call).
    #[error("Platform adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// A database error. When the failed write is the ledger row itself,
    /// this is fatal for the attempt.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An inbound webhook failed signature verification. Rejected at the
    /// boundary with no state mutation.
    #[error("Invalid webhook signature")]
    SignatureInvalid,
}
