//! Deterministic pair enumeration for full-set reconciliation.

use crate::types::DbId;

/// All unordered pairs `(i, j)` with `i < j` over a platform list, in the
/// list's own order. `SyncAll` walks this sequence so repeated runs visit
/// pairs in the same deterministic order.
pub fn unordered_pairs(platform_ids: &[DbId]) -> Vec<(DbId, DbId)> {
    let mut pairs = Vec::with_capacity(platform_ids.len().saturating_sub(1));
    for i in 0..platform_ids.len() {
        for j in (i + 1)..platform_ids.len() {
            pairs.push((platform_ids[i], platform_ids[j]));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_platforms_produce_one_pair() {
        assert_eq!(unordered_pairs(&[10, 20]), vec![(10, 20)]);
    }

    #[test]
    fn three_platforms_produce_three_pairs_in_order() {
        assert_eq!(
            unordered_pairs(&[1, 2, 3]),
            vec![(1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn fewer_than_two_platforms_produce_nothing() {
        assert!(unordered_pairs(&[]).is_empty());
        assert!(unordered_pairs(&[7]).is_empty());
    }

    #[test]
    fn order_follows_input_list() {
        // The registry returns a stable ascending list; pairs follow it.
        assert_eq!(unordered_pairs(&[5, 3]), vec![(5, 3)]);
    }
}
