//! Elo rating model: expected scores, outcome application, ranked order.
//!
//! Pure functions over item snapshots. `record_comparison` returns a fresh
//! collection and never mutates its input, so callers can keep the previous
//! snapshot around for undo or diffing.

use crate::constants::DEFAULT_K_FACTOR;
use crate::types::{RankError, RankableItem};

/// Probability that an item rated `rating_a` beats one rated `rating_b`
/// under the logistic Elo model.
///
/// Always in (0, 1). Equal ratings give exactly 0.5, and
/// `expected_score(a, b) + expected_score(b, a) == 1` for any finite pair.
pub fn expected_score(rating_a: i32, rating_b: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((f64::from(rating_b) - f64::from(rating_a)) / 400.0))
}

/// Apply a decided outcome to the two participants' ratings.
///
/// Returns `(new_winner_rating, new_loser_rating)`, each rounded to the
/// nearest integer, half away from zero (`f64::round`). The rating sum is
/// conserved up to that rounding (at most ±1 per side). An upset — the
/// lower-rated item winning — swings harder than an expected result,
/// because the expected score sits further from the actual outcome.
pub fn apply_outcome(winner: &RankableItem, loser: &RankableItem, k_factor: f64) -> (i32, i32) {
    let expected_win = expected_score(winner.rating(), loser.rating());
    let expected_lose = expected_score(loser.rating(), winner.rating());

    let new_winner = f64::from(winner.rating()) + k_factor * (1.0 - expected_win);
    let new_loser = f64::from(loser.rating()) - k_factor * expected_lose;

    (new_winner.round() as i32, new_loser.round() as i32)
}

/// Record a decided comparison with the default K-factor.
pub fn record_comparison(
    items: &[RankableItem],
    winner_id: &str,
    loser_id: &str,
) -> Result<Vec<RankableItem>, RankError> {
    record_comparison_with_k(items, winner_id, loser_id, DEFAULT_K_FACTOR)
}

/// Record a decided comparison with an explicit K-factor.
///
/// Looks up both participants by id, applies the rating update, and returns
/// a new collection in which only the winner and loser differ: updated
/// rating, comparison counter bumped by one. Fails with
/// [`RankError::UnknownItem`] before touching anything if either id is
/// absent.
pub fn record_comparison_with_k(
    items: &[RankableItem],
    winner_id: &str,
    loser_id: &str,
    k_factor: f64,
) -> Result<Vec<RankableItem>, RankError> {
    assert!(winner_id != loser_id, "winner and loser must be distinct items");

    let winner = items
        .iter()
        .find(|i| i.id() == winner_id)
        .ok_or_else(|| RankError::UnknownItem(winner_id.to_string()))?;
    let loser = items
        .iter()
        .find(|i| i.id() == loser_id)
        .ok_or_else(|| RankError::UnknownItem(loser_id.to_string()))?;

    let (new_winner_rating, new_loser_rating) = apply_outcome(winner, loser, k_factor);

    Ok(items
        .iter()
        .map(|item| {
            if item.id() == winner_id {
                item.with_recorded_result(new_winner_rating)
            } else if item.id() == loser_id {
                item.with_recorded_result(new_loser_rating)
            } else {
                item.clone()
            }
        })
        .collect())
}

/// Items sorted by rating, highest first.
///
/// The sort is stable: items with equal ratings keep their relative order
/// from the input, so the result is deterministic for a given snapshot.
pub fn get_ranked_order(items: &[RankableItem]) -> Vec<RankableItem> {
    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| b.rating().cmp(&a.rating()));
    ranked
}
