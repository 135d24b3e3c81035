//! Convergence policy: deciding when comparisons are sufficient to trust
//! the ranking.

use crate::constants::STABLE_COMPARISONS_PER_ITEM;
use crate::types::RankableItem;

/// True once every item has accumulated at least
/// [`STABLE_COMPARISONS_PER_ITEM`] comparisons.
///
/// Vacuously true for an empty collection. A lone item can never accumulate
/// comparisons, so a singleton collection with no history stays unstable
/// forever; callers that allow single-item sets must special-case that
/// themselves.
pub fn is_stable(items: &[RankableItem]) -> bool {
    items
        .iter()
        .all(|i| i.comparison_count() >= STABLE_COMPARISONS_PER_ITEM)
}

/// Expected total number of comparisons for a stable ranking over
/// `item_count` items: two per item.
///
/// A progress estimate, not a stopping rule — pair selection keeps going as
/// long as the caller asks.
pub fn estimate_required_comparisons(item_count: usize) -> usize {
    item_count * 2
}
