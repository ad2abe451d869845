//! Per-platform async mutual exclusion.
//!
//! Every reconciliation touching a platform holds that platform's lock
//! for its full duration, so two concurrent syncs sharing a platform
//! serialize instead of interleaving writes. Pair acquisition always
//! locks the lower platform id first, which rules out lock-order
//! deadlock between overlapping pairs.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::OwnedMutexGuard;

use shopsync_core::types::DbId;

/// Lock table keyed by platform id.
///
/// Lock entries are created on first use and kept for the life of the
/// process; the table only ever holds one entry per connected platform.
#[derive(Default)]
pub struct PlatformLocks {
    inner: Mutex<HashMap<DbId, Arc<tokio::sync::Mutex<()>>>>,
}

impl PlatformLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, platform_id: DbId) -> Arc<tokio::sync::Mutex<()>> {
        let mut table = self.inner.lock().expect("platform lock table poisoned");
        Arc::clone(table.entry(platform_id).or_default())
    }

    /// Hold one platform for the duration of the returned guard.
    pub async fn lock_one(&self, platform_id: DbId) -> OwnedMutexGuard<()> {
        self.handle(platform_id).lock_owned().await
    }

    /// Hold both platforms of a pair, acquired in ascending id order.
    ///
    /// The two ids must differ; pairwise sync validates that before
    /// reaching here.
    pub async fn lock_pair(
        &self,
        a: DbId,
        b: DbId,
    ) -> (OwnedMutexGuard<()>, OwnedMutexGuard<()>) {
        debug_assert_ne!(a, b);
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first_guard = self.handle(first).lock_owned().await;
        let second_guard = self.handle(second).lock_owned().await;
        (first_guard, second_guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn same_platform_serializes() {
        let locks = Arc::new(PlatformLocks::new());
        let in_critical = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = Arc::clone(&locks);
            let in_critical = Arc::clone(&in_critical);
            let max_seen = Arc::clone(&max_seen);
            handles.push(tokio::spawn(async move {
                let _guard = locks.lock_one(1).await;
                let now = in_critical.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                in_critical.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn crossed_pairs_do_not_deadlock() {
        let locks = Arc::new(PlatformLocks::new());

        let mut handles = Vec::new();
        for &(a, b) in &[(1, 2), (2, 1), (2, 3), (3, 1)] {
            let locks = Arc::clone(&locks);
            handles.push(tokio::spawn(async move {
                let _guards = locks.lock_pair(a, b).await;
                tokio::time::sleep(Duration::from_millis(1)).await;
            }));
        }

        tokio::time::timeout(Duration::from_secs(5), async {
            for handle in handles {
                handle.await.unwrap();
            }
        })
        .await
        .expect("pair locking deadlocked");
    }

    #[tokio::test]
    async fn distinct_platforms_run_concurrently() {
        let locks = Arc::new(PlatformLocks::new());
        let _one = locks.lock_one(1).await;
        // Holding 1 must not block 2.
        let _two = tokio::time::timeout(Duration::from_millis(100), locks.lock_one(2))
            .await
            .expect("independent platform lock blocked");
    }
}
