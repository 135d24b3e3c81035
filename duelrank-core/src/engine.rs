//! Session orchestrator.
//!
//! The underlying operations are pure functions over item snapshots; the
//! session packages them together with a working copy of the items, the
//! session tuning, and the one piece of inter-call state a caller would
//! otherwise track by hand: which matchup is currently awaiting judgment,
//! so that removing an item can invalidate it.

use rand::Rng;

use crate::constants::DEFAULT_K_FACTOR;
use crate::convergence::{estimate_required_comparisons, is_stable};
use crate::pairing::{select_next_pair_with_rng, PairingMode};
use crate::scoring::{get_ranked_order, record_comparison_with_k};
use crate::types::{initialize_items, ComparisonOutcome, Matchup, RankError, RankableItem};

/// Per-session tuning. Independent sessions can run different K-factors and
/// pairing modes side by side; nothing is shared between them.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Maximum rating swing per comparison.
    pub k_factor: f64,
    /// Whether lopsided matchups are filtered out.
    pub pairing_mode: PairingMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            k_factor: DEFAULT_K_FACTOR,
            pairing_mode: PairingMode::Standard,
        }
    }
}

/// A ranking session: a working set of items plus the judging loop state.
///
/// The session performs no IO and holds no global state; persisting and
/// restoring the item collection is the caller's concern
/// (see [`RankingSession::from_items`]).
pub struct RankingSession {
    items: Vec<RankableItem>,
    config: SessionConfig,
    /// Ids of the matchup most recently handed out and not yet resolved.
    pending: Option<(String, String)>,
    comparisons_recorded: usize,
}

impl RankingSession {
    /// Start a fresh session from an ordered list of names.
    pub fn new<I, S>(names: I, config: SessionConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RankingSession {
            items: initialize_items(names),
            config,
            pending: None,
            comparisons_recorded: 0,
        }
    }

    /// Resume from a previously persisted working set, ratings and counts
    /// intact. The engine simply continues from whatever state it is given.
    pub fn from_items(items: Vec<RankableItem>, config: SessionConfig) -> Self {
        RankingSession {
            items,
            config,
            pending: None,
            comparisons_recorded: 0,
        }
    }

    /// The current working set, in insertion order.
    pub fn items(&self) -> &[RankableItem] {
        &self.items
    }

    /// Number of items being ranked.
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Comparisons recorded through this session (skips excluded).
    pub fn comparisons_recorded(&self) -> usize {
        self.comparisons_recorded
    }

    /// Append a new item mid-session, starting at the default rating with
    /// no history. Returns the new item's id.
    pub fn add_item(&mut self, name: impl Into<String>) -> String {
        let item = RankableItem::new(name);
        let id = item.id().to_string();
        self.items.push(item);
        id
    }

    /// Remove an item from the working set.
    ///
    /// A pending matchup that references the removed item is discarded, so
    /// the next pair request reselects from the survivors.
    pub fn remove_item(&mut self, id: &str) -> Result<RankableItem, RankError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.id() == id)
            .ok_or_else(|| RankError::UnknownItem(id.to_string()))?;

        if let Some((ref a, ref b)) = self.pending {
            if a == id || b == id {
                self.pending = None;
            }
        }

        Ok(self.items.remove(idx))
    }

    /// Next matchup to present, using the process-wide RNG.
    pub fn next_pair(&mut self) -> Option<Matchup> {
        self.next_pair_with_rng(&mut rand::rng())
    }

    /// Next matchup with a caller-supplied RNG.
    pub fn next_pair_with_rng(&mut self, rng: &mut impl Rng) -> Option<Matchup> {
        let pair = select_next_pair_with_rng(&self.items, self.config.pairing_mode, rng)?;
        self.pending = Some((pair.0.id().to_string(), pair.1.id().to_string()));
        Some(pair)
    }

    /// Resolve the outstanding matchup.
    ///
    /// A decided outcome updates ratings and counters through the rating
    /// model; a skip changes nothing. Either way the pending matchup is
    /// cleared. On an unknown id nothing changes at all, including the
    /// pending state.
    pub fn record_outcome(&mut self, outcome: &ComparisonOutcome) -> Result<(), RankError> {
        match outcome {
            ComparisonOutcome::Decided { winner_id, loser_id } => {
                let updated =
                    record_comparison_with_k(&self.items, winner_id, loser_id, self.config.k_factor)?;
                self.items = updated;
                self.comparisons_recorded += 1;
            }
            ComparisonOutcome::Skipped => {}
        }
        self.pending = None;
        Ok(())
    }

    /// Current standings, best first.
    pub fn rankings(&self) -> Vec<RankableItem> {
        get_ranked_order(&self.items)
    }

    /// Whether every item has enough comparisons to trust the ordering.
    pub fn is_stable(&self) -> bool {
        is_stable(&self.items)
    }

    /// Expected total comparisons for the current item count, for progress
    /// reporting.
    pub fn estimated_total_comparisons(&self) -> usize {
        estimate_required_comparisons(self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn decided(winner_id: &str, loser_id: &str) -> ComparisonOutcome {
        ComparisonOutcome::Decided {
            winner_id: winner_id.to_string(),
            loser_id: loser_id.to_string(),
        }
    }

    #[test]
    fn test_basic_judging_workflow() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut session = RankingSession::new(["a", "b", "c"], SessionConfig::default());

        let (first, second) = session.next_pair_with_rng(&mut rng).unwrap();
        session.record_outcome(&decided(first.id(), second.id())).unwrap();

        assert_eq!(session.comparisons_recorded(), 1);
        let winner = session.items().iter().find(|i| i.id() == first.id()).unwrap();
        assert!(winner.rating() > crate::constants::DEFAULT_RATING);
        assert_eq!(winner.comparison_count(), 1);
    }

    #[test]
    fn test_skip_changes_nothing() {
        let mut rng = SmallRng::seed_from_u64(12);
        let mut session = RankingSession::new(["a", "b"], SessionConfig::default());

        let _ = session.next_pair_with_rng(&mut rng).unwrap();
        session.record_outcome(&ComparisonOutcome::Skipped).unwrap();

        assert_eq!(session.comparisons_recorded(), 0);
        assert!(session
            .items()
            .iter()
            .all(|i| i.comparison_count() == 0 && i.rating() == crate::constants::DEFAULT_RATING));

        // A fresh pair is still available.
        assert!(session.next_pair_with_rng(&mut rng).is_some());
    }

    #[test]
    fn test_add_item_mid_session() {
        let mut session = RankingSession::new(["a", "b"], SessionConfig::default());
        let id = session.add_item("late arrival");

        assert_eq!(session.num_items(), 3);
        let added = session.items().iter().find(|i| i.id() == id).unwrap();
        assert_eq!(added.rating(), crate::constants::DEFAULT_RATING);
        assert_eq!(added.comparison_count(), 0);
        assert_eq!(session.estimated_total_comparisons(), 6);
    }

    #[test]
    fn test_remove_item_discards_pending_pair() {
        let mut rng = SmallRng::seed_from_u64(13);
        let mut session = RankingSession::new(["a", "b", "c"], SessionConfig::default());

        let (first, _second) = session.next_pair_with_rng(&mut rng).unwrap();
        session.remove_item(first.id()).unwrap();
        assert_eq!(session.num_items(), 2);

        // The discarded matchup is never recorded against the removed item;
        // selection continues over the survivors.
        let (next_first, next_second) = session.next_pair_with_rng(&mut rng).unwrap();
        assert_ne!(next_first.id(), first.id());
        assert_ne!(next_second.id(), first.id());
    }

    #[test]
    fn test_remove_unknown_item_fails() {
        let mut session = RankingSession::new(["a", "b"], SessionConfig::default());
        let err = session.remove_item("missing").unwrap_err();
        assert_eq!(err, RankError::UnknownItem("missing".to_string()));
        assert_eq!(session.num_items(), 2);
    }

    #[test]
    fn test_resumed_session_keeps_prior_state() {
        let mut rng = SmallRng::seed_from_u64(14);
        let mut session = RankingSession::new(["a", "b"], SessionConfig::default());
        let (first, second) = session.next_pair_with_rng(&mut rng).unwrap();
        session.record_outcome(&decided(first.id(), second.id())).unwrap();

        let snapshot = session.items().to_vec();
        let resumed = RankingSession::from_items(snapshot.clone(), SessionConfig::default());

        assert_eq!(resumed.items(), &snapshot[..]);
        assert!(resumed
            .items()
            .iter()
            .all(|i| i.comparison_count() == 1));
    }

    #[test]
    fn test_true_order_recovered_at_stability() {
        let mut rng = SmallRng::seed_from_u64(15);
        let names = ["alpha", "bravo", "charlie", "delta"];
        let mut session = RankingSession::new(names, SessionConfig::default());

        // Ground truth: position in `names`, earlier is stronger.
        let strength: HashMap<String, usize> = session
            .items()
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id().to_string(), pos))
            .collect();

        let mut steps = 0;
        while !session.is_stable() {
            steps += 1;
            assert!(steps <= 100, "ranking failed to stabilize");

            let (first, second) = session.next_pair_with_rng(&mut rng).unwrap();
            let (winner, loser) = if strength[first.id()] < strength[second.id()] {
                (first, second)
            } else {
                (second, first)
            };
            session.record_outcome(&decided(winner.id(), loser.id())).unwrap();
        }

        let ranked = session.rankings();
        let pos = |name: &str| ranked.iter().position(|i| i.name() == name).unwrap();
        assert!(
            pos("alpha") < pos("delta"),
            "the consistently preferred item must rank above the consistently rejected one"
        );
    }
}
