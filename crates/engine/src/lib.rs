//! ShopSync reconciliation engine.
//!
//! The orchestrator between the platform registry, the adapters, and the
//! sync ledger:
//!
//! - [`SyncEngine`] — pairwise and full-set stock reconciliation with
//!   bounded write concurrency, per-platform mutual exclusion, and a
//!   mandatory ledger row per attempt.
//! - [`WebhookIngestor`] — verified → stored → routed → processed
//!   handling of inbound platform webhooks, folding externally-pushed
//!   changes into the same reconciliation pipeline.

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod locks;

pub use config::EngineConfig;
pub use engine::{PairOutcome, SyncEngine, SyncReport};
pub use error::EngineError;
pub use ingest::{IngestOutcome, WebhookIngestor};
pub use locks::PlatformLocks;
