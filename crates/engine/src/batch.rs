//! Bounded-concurrency item loop for one pairwise sync.
//!
//! The loop holds no database handle: links are prefetched into a map
//! and every per-item step is pure except the single adapter write.
//! Writes are absolute quantities, so replaying a batch converges
//! instead of compounding.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use shopsync_adapters::{InventoryTarget, PlatformAdapter, ProductSnapshot};
use shopsync_core::outcome::{
    BatchTally, ItemFailure, ItemOutcome, SyncStatus, REASON_MISSING_SKU, REASON_UNMAPPED_SKU,
};
use shopsync_core::stock::resolve_quantity;
use shopsync_db::models::product::SkuLink;

/// Result of running one batch to completion or cancellation.
#[derive(Debug)]
pub struct BatchOutcome {
    pub tally: BatchTally,
    /// Whether the caller cancelled before every item finished. The tally
    /// then reflects only the items observed up to that point.
    pub cancelled: bool,
}

impl BatchOutcome {
    /// Ledger status for this batch.
    pub fn status(&self) -> SyncStatus {
        if self.cancelled {
            SyncStatus::Cancelled
        } else {
            self.tally.status()
        }
    }
}

/// Push every source snapshot to the target platform.
///
/// At most `concurrency` writes are in flight at once. Outcomes complete
/// in arbitrary order; the tally is commutative so the result does not
/// depend on scheduling.
pub async fn run_batch(
    snapshots: Vec<ProductSnapshot>,
    links: &HashMap<String, SkuLink>,
    target: Arc<dyn PlatformAdapter>,
    concurrency: usize,
    cancel: &CancellationToken,
) -> BatchOutcome {
    let mut stream = futures::stream::iter(snapshots.into_iter().map(|snapshot| {
        let target = Arc::clone(&target);
        async move { sync_item(snapshot, links, target.as_ref()).await }
    }))
    .buffer_unordered(concurrency.max(1));

    let mut tally = BatchTally::new();
    let mut cancelled = false;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                cancelled = true;
                break;
            }
            next = stream.next() => match next {
                Some(outcome) => tally.record(outcome),
                None => break,
            }
        }
    }

    BatchOutcome { tally, cancelled }
}

/// Process one source item: match its SKU to a target link and write the
/// resolved quantity.
async fn sync_item(
    snapshot: ProductSnapshot,
    links: &HashMap<String, SkuLink>,
    target: &dyn PlatformAdapter,
) -> ItemOutcome {
    let Some(sku) = snapshot.sku else {
        // No SKU to match on; label the failure with the platform's own
        // product id so the ledger entry is still actionable.
        return ItemOutcome::Failed(ItemFailure::new(
            snapshot.external_product_id,
            REASON_MISSING_SKU,
        ));
    };

    let Some(link) = links.get(&sku) else {
        return ItemOutcome::Failed(ItemFailure::new(sku, REASON_UNMAPPED_SKU));
    };

    let quantity = resolve_quantity(snapshot.stock);
    let inventory_target = InventoryTarget {
        external_product_id: link.external_product_id.clone(),
        external_variant_id: link.external_variant_id.clone(),
        external_inventory_item_id: link.external_inventory_item_id.clone(),
    };

    match target.set_stock(&inventory_target, quantity).await {
        Ok(()) => ItemOutcome::Synced,
        Err(error) => {
            tracing::debug!(%error, sku, "Stock write failed");
            ItemOutcome::Failed(ItemFailure::new(sku, error.reason()))
        }
    }
}
