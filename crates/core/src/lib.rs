//! ShopSync domain core.
//!
//! Pure domain logic shared by the adapter, engine, db, and API crates:
//!
//! - [`error::CoreError`] — domain error taxonomy.
//! - [`signature`] — constant-time webhook HMAC verification.
//! - [`stock`] — the source-of-truth stock quantity rule.
//! - [`outcome`] — per-item sync outcomes and commutative aggregation.
//! - [`webhook`] — webhook topic routing and payload normalization.
//! - [`pairing`] — deterministic unordered platform pair enumeration.
//! - [`credentials`] — typed per-platform credential bundles.
//!
//! This crate has zero internal dependencies so it can be used from any
//! layer, including future CLI or worker tooling.

pub mod credentials;
pub mod error;
pub mod outcome;
pub mod pairing;
pub mod signature;
pub mod stock;
pub mod types;
pub mod webhook;

pub use credentials::{PlatformCredentials, PlatformType};
pub use error::CoreError;
pub use outcome::{BatchTally, ItemFailure, SyncStatus};
