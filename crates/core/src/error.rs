//! Domain error taxonomy.
//!
//! Item-level sync failures are NOT represented here — they are data
//! (see [`crate::outcome::ItemFailure`]) and never abort a batch.
//! `CoreError` covers faults that stop an operation.

use crate::types::DbId;

/// Domain-level error shared across crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity was not found, or is not owned by the requesting user.
    /// Ownership misses deliberately look identical to absence so that
    /// cross-user probing leaks nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation before any state was touched.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Fewer than two active platforms; there is nothing to reconcile.
    /// Surfaced immediately and never written to the sync ledger.
    #[error("At least 2 active platforms are required to sync, found {0}")]
    InsufficientPlatforms(usize),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the common not-found construction.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = CoreError::not_found("platform", 42);
        assert_eq!(err.to_string(), "platform with id 42 not found");
    }

    #[test]
    fn insufficient_platforms_display_includes_count() {
        let err = CoreError::InsufficientPlatforms(1);
        assert!(err.to_string().contains("found 1"));
    }
}
