//! Per-item sync outcomes and their aggregation.
//!
//! The engine's item loop runs with bounded concurrency, so outcomes
//! arrive in arbitrary order. [`BatchTally`] is a commutative merge:
//! counts and the error list do not depend on completion order, only the
//! multiset of outcomes.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Failure reasons
// ---------------------------------------------------------------------------

/// Item-level failure reason: no Product-Platform Link exists for the SKU
/// on the target platform.
pub const REASON_UNMAPPED_SKU: &str = "unmapped-sku";

/// Item-level failure reason: the target platform needs a configured
/// inventory location and none is set on the credentials.
pub const REASON_MISSING_LOCATION: &str = "missing-location";

/// Item-level failure reason: the source listing carries no SKU for the
/// item, so it cannot be matched on the target at all.
pub const REASON_MISSING_SKU: &str = "missing-sku";

/// Item-level failure reason: the platform rejected the credentials.
pub const REASON_AUTH_ERROR: &str = "auth-error";

/// Item-level failure reason: the platform throttled the call.
pub const REASON_RATE_LIMITED: &str = "rate-limited";

/// Item-level failure reason: the external reference no longer exists.
pub const REASON_NOT_FOUND: &str = "not-found";

/// Item-level failure reason: network fault, timeout, or 5xx response.
pub const REASON_TRANSPORT_ERROR: &str = "transport-error";

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// One per-item failure, recorded in the ledger's error detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    pub sku: String,
    pub reason: String,
}

impl ItemFailure {
    pub fn new(sku: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of processing a single item.
#[derive(Debug, Clone)]
pub enum ItemOutcome {
    Synced,
    Failed(ItemFailure),
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

/// Overall status of one reconciliation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Every item succeeded (including the empty batch).
    Success,
    /// Some items succeeded, some failed.
    Partial,
    /// Every item failed, or the batch aborted before iterating.
    Failed,
    /// The caller cancelled mid-batch; counts reflect work observed so far.
    Cancelled,
}

impl SyncStatus {
    /// Database representation. Matches the `sync_logs.status` CHECK set.
    pub fn as_str(self) -> &'static str {
        match self {
            SyncStatus::Success => "success",
            SyncStatus::Partial => "partial",
            SyncStatus::Failed => "failed",
            SyncStatus::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Commutative aggregation
// ---------------------------------------------------------------------------

/// Running aggregate over per-item outcomes.
///
/// `merge` and `record` are commutative and associative in the outcome
/// multiset, so any completion order produces the same tally.
#[derive(Debug, Clone, Default)]
pub struct BatchTally {
    pub items_synced: u32,
    pub items_failed: u32,
    pub failures: Vec<ItemFailure>,
}

impl BatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one item outcome into the tally.
    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Synced => self.items_synced += 1,
            ItemOutcome::Failed(failure) => {
                self.items_failed += 1;
                self.failures.push(failure);
            }
        }
    }

    /// Merge another tally into this one.
    pub fn merge(&mut self, other: BatchTally) {
        self.items_synced += other.items_synced;
        self.items_failed += other.items_failed;
        self.failures.extend(other.failures);
    }

    /// Classify the completed batch.
    ///
    /// `success` when nothing failed, `partial` when some but not all
    /// items failed, `failed` when every item failed. The empty batch is
    /// a success: there was nothing to reconcile and nothing went wrong.
    pub fn status(&self) -> SyncStatus {
        if self.items_failed == 0 {
            SyncStatus::Success
        } else if self.items_synced == 0 {
            SyncStatus::Failed
        } else {
            SyncStatus::Partial
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(sku: &str) -> ItemOutcome {
        ItemOutcome::Failed(ItemFailure::new(sku, REASON_UNMAPPED_SKU))
    }

    #[test]
    fn all_synced_is_success() {
        let mut tally = BatchTally::new();
        tally.record(ItemOutcome::Synced);
        tally.record(ItemOutcome::Synced);
        assert_eq!(tally.status(), SyncStatus::Success);
        assert_eq!(tally.items_synced, 2);
        assert_eq!(tally.items_failed, 0);
    }

    #[test]
    fn mixed_outcomes_are_partial() {
        let mut tally = BatchTally::new();
        tally.record(ItemOutcome::Synced);
        tally.record(failed("ABC"));
        assert_eq!(tally.status(), SyncStatus::Partial);
    }

    #[test]
    fn all_failed_is_failed() {
        let mut tally = BatchTally::new();
        tally.record(failed("ABC"));
        assert_eq!(tally.status(), SyncStatus::Failed);
        assert_eq!(tally.failures, vec![ItemFailure::new("ABC", "unmapped-sku")]);
    }

    #[test]
    fn empty_batch_is_success() {
        assert_eq!(BatchTally::new().status(), SyncStatus::Success);
    }

    #[test]
    fn aggregation_is_order_independent() {
        // Same outcome multiset folded in two different orders.
        let outcomes = vec![
            ItemOutcome::Synced,
            failed("A"),
            ItemOutcome::Synced,
            failed("B"),
            ItemOutcome::Synced,
        ];

        let mut forward = BatchTally::new();
        for outcome in outcomes.clone() {
            forward.record(outcome);
        }

        let mut reverse = BatchTally::new();
        for outcome in outcomes.into_iter().rev() {
            reverse.record(outcome);
        }

        assert_eq!(forward.items_synced, reverse.items_synced);
        assert_eq!(forward.items_failed, reverse.items_failed);
        assert_eq!(forward.status(), reverse.status());

        let mut forward_skus: Vec<_> = forward.failures.iter().map(|f| &f.sku).collect();
        let mut reverse_skus: Vec<_> = reverse.failures.iter().map(|f| &f.sku).collect();
        forward_skus.sort();
        reverse_skus.sort();
        assert_eq!(forward_skus, reverse_skus);
    }

    #[test]
    fn merge_matches_sequential_record() {
        let mut left = BatchTally::new();
        left.record(ItemOutcome::Synced);
        left.record(failed("A"));

        let mut right = BatchTally::new();
        right.record(ItemOutcome::Synced);

        let mut merged = BatchTally::new();
        merged.merge(left);
        merged.merge(right);

        assert_eq!(merged.items_synced, 2);
        assert_eq!(merged.items_failed, 1);
        assert_eq!(merged.status(), SyncStatus::Partial);
    }

    #[test]
    fn status_strings_match_ledger_check_set() {
        assert_eq!(SyncStatus::Success.as_str(), "success");
        assert_eq!(SyncStatus::Partial.as_str(), "partial");
        assert_eq!(SyncStatus::Failed.as_str(), "failed");
        assert_eq!(SyncStatus::Cancelled.as_str(), "cancelled");
    }
}
