//! Matchup selection: who to compare next.
//!
//! The primary item is the one that has been compared least, keeping
//! coverage even; its opponent comes from the few nearest-rated items,
//! keeping the comparison informative. Presentation order is coin-flipped
//! so neither prompt slot carries positional bias.
//!
//! Selection is stateless: each call derives the next matchup purely from
//! the snapshot it is given.

use rand::Rng;

use crate::constants::{CANDIDATE_POOL_SIZE, EXPRESS_RATING_WINDOW};
use crate::types::{Matchup, RankableItem};

/// Whether to filter out lopsided matchups before picking candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PairingMode {
    /// Every opponent is eligible.
    #[default]
    Standard,
    /// Prefer opponents within [`EXPRESS_RATING_WINDOW`] rating points of
    /// the primary item when any exist; matchups outside the window are
    /// usually obvious. Falls back to the full pool rather than returning
    /// no pair.
    Express,
}

/// Select the next matchup using the process-wide RNG.
///
/// Returns `None` when the collection has fewer than two items — a normal
/// boundary condition, not an error.
pub fn select_next_pair(items: &[RankableItem], mode: PairingMode) -> Option<Matchup> {
    select_next_pair_with_rng(items, mode, &mut rand::rng())
}

/// Select the next matchup with a caller-supplied RNG, for deterministic
/// tests and reproducible simulations.
pub fn select_next_pair_with_rng(
    items: &[RankableItem],
    mode: PairingMode,
    rng: &mut impl Rng,
) -> Option<Matchup> {
    if items.len() < 2 {
        return None;
    }

    // Primary: uniform draw from the items tied for fewest comparisons.
    let min_count = items.iter().map(RankableItem::comparison_count).min()?;
    let least_compared: Vec<&RankableItem> = items
        .iter()
        .filter(|i| i.comparison_count() == min_count)
        .collect();
    let primary = least_compared[rng.random_range(0..least_compared.len())];

    let mut pool: Vec<&RankableItem> =
        items.iter().filter(|i| i.id() != primary.id()).collect();

    if mode == PairingMode::Express {
        let near: Vec<&RankableItem> = pool
            .iter()
            .copied()
            .filter(|o| rating_distance(o, primary) <= i64::from(EXPRESS_RATING_WINDOW))
            .collect();
        if !near.is_empty() {
            pool = near;
        }
    }

    // Keep the closest-rated opponents as candidates. Stable sort, so
    // equidistant opponents keep snapshot order ahead of the cut.
    pool.sort_by_key(|o| rating_distance(o, primary));
    pool.truncate(CANDIDATE_POOL_SIZE);

    let secondary = pool[rng.random_range(0..pool.len())];

    if rng.random::<f64>() < 0.5 {
        Some((primary.clone(), secondary.clone()))
    } else {
        Some((secondary.clone(), primary.clone()))
    }
}

fn rating_distance(a: &RankableItem, b: &RankableItem) -> i64 {
    (i64::from(a.rating()) - i64::from(b.rating())).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::record_comparison;
    use crate::types::initialize_items;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    /// Drive an item to the given rating and comparison count without going
    /// through real matchups. With zero comparisons the item keeps the
    /// default rating, so callers pass 1500 there.
    fn item_with(name: &str, rating: i32, comparisons: u32) -> RankableItem {
        let mut item = RankableItem::new(name);
        for _ in 0..comparisons {
            item = item.with_recorded_result(rating);
        }
        item
    }

    #[test]
    fn test_no_pair_below_two_items() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(select_next_pair_with_rng(&[], PairingMode::Standard, &mut rng).is_none());

        let one = initialize_items(["only"]);
        assert!(select_next_pair_with_rng(&one, PairingMode::Standard, &mut rng).is_none());
    }

    #[test]
    fn test_pair_is_two_distinct_members() {
        let items = initialize_items(["a", "b", "c", "d", "e"]);
        let ids: HashSet<&str> = items.iter().map(RankableItem::id).collect();
        let mut rng = SmallRng::seed_from_u64(2);

        for _ in 0..100 {
            let (first, second) =
                select_next_pair_with_rng(&items, PairingMode::Standard, &mut rng).unwrap();
            assert_ne!(first.id(), second.id());
            assert!(ids.contains(first.id()));
            assert!(ids.contains(second.id()));
        }
    }

    #[test]
    fn test_primary_is_least_compared() {
        // One item clearly behind on coverage: every matchup must include it.
        let items = vec![
            item_with("behind", 1500, 0),
            item_with("b", 1490, 4),
            item_with("c", 1510, 4),
            item_with("d", 1520, 4),
        ];
        let behind_id = items[0].id().to_string();
        let mut rng = SmallRng::seed_from_u64(3);

        for _ in 0..50 {
            let (first, second) =
                select_next_pair_with_rng(&items, PairingMode::Standard, &mut rng).unwrap();
            assert!(
                first.id() == behind_id || second.id() == behind_id,
                "least-compared item must be in every matchup"
            );
        }
    }

    #[test]
    fn test_opponent_comes_from_nearest_candidates() {
        // Primary is pinned by comparison count; only the three
        // closest-rated opponents may appear opposite it.
        let items = vec![
            item_with("primary", 1500, 0),
            item_with("near1", 1510, 2),
            item_with("near2", 1480, 2),
            item_with("near3", 1530, 2),
            item_with("far1", 2000, 2),
            item_with("far2", 2500, 2),
        ];
        let primary_id = items[0].id().to_string();
        let eligible: HashSet<&str> =
            items[1..4].iter().map(RankableItem::id).collect();
        let mut rng = SmallRng::seed_from_u64(4);

        for _ in 0..100 {
            let (first, second) =
                select_next_pair_with_rng(&items, PairingMode::Standard, &mut rng).unwrap();
            let opponent = if first.id() == primary_id { &second } else { &first };
            assert!(
                eligible.contains(opponent.id()),
                "opponent {} is not among the nearest-rated candidates",
                opponent.name()
            );
        }
    }

    #[test]
    fn test_presentation_order_randomized() {
        let items = vec![
            item_with("primary", 1500, 0),
            item_with("other", 1500, 5),
        ];
        let primary_id = items[0].id().to_string();
        let mut rng = SmallRng::seed_from_u64(5);

        let mut first_slot = 0;
        let mut second_slot = 0;
        for _ in 0..100 {
            let (first, _) =
                select_next_pair_with_rng(&items, PairingMode::Standard, &mut rng).unwrap();
            if first.id() == primary_id {
                first_slot += 1;
            } else {
                second_slot += 1;
            }
        }
        assert!(first_slot > 0, "primary never shown first");
        assert!(second_slot > 0, "primary never shown second");
    }

    #[test]
    fn test_express_filters_lopsided_opponents() {
        let items = vec![
            item_with("primary", 1500, 0),
            item_with("close", 1600, 2),
            item_with("distant", 3000, 2),
        ];
        let close_id = items[1].id().to_string();
        let primary_id = items[0].id().to_string();
        let mut rng = SmallRng::seed_from_u64(6);

        for _ in 0..50 {
            let (first, second) =
                select_next_pair_with_rng(&items, PairingMode::Express, &mut rng).unwrap();
            let opponent = if first.id() == primary_id { &second } else { &first };
            assert_eq!(opponent.id(), close_id, "express mode must prefer the in-window opponent");
        }
    }

    #[test]
    fn test_express_falls_back_when_no_close_opponent() {
        let items = vec![
            item_with("primary", 1500, 0),
            item_with("far1", 2200, 2),
            item_with("far2", 2400, 2),
        ];
        let mut rng = SmallRng::seed_from_u64(7);

        // No opponent within the window: the filter must not block pairing.
        let pair = select_next_pair_with_rng(&items, PairingMode::Express, &mut rng);
        assert!(pair.is_some());
    }

    #[test]
    fn test_repeated_selection_covers_all_pairs() {
        let mut items = initialize_items(["a", "b", "c", "d"]);
        let mut rng = SmallRng::seed_from_u64(8);
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let total_pairs = 6; // C(4, 2)

        for round in 0..100 {
            let (first, second) =
                select_next_pair_with_rng(&items, PairingMode::Standard, &mut rng).unwrap();
            let mut key = (first.id().to_string(), second.id().to_string());
            if key.0 > key.1 {
                std::mem::swap(&mut key.0, &mut key.1);
            }
            seen.insert(key);
            if seen.len() == total_pairs {
                return;
            }

            // Alternate winners so ratings stay interleaved.
            let (winner, loser) = if round % 2 == 0 { (&first, &second) } else { (&second, &first) };
            items = record_comparison(&items, winner.id(), loser.id()).unwrap();
        }

        panic!("only {} of {} pairs selected within the iteration budget", seen.len(), total_pairs);
    }
}
