//! duelrank-core: Pure-computation pairwise ranking engine.
//!
//! Pairwise judgments → Elo ratings → ranked list. No IO, no global state —
//! bring your own judge.
//!
//! Item collections are immutable snapshots: operations take a slice and
//! return a fresh `Vec`, so state-driven UIs can keep old snapshots around
//! without aliasing surprises. [`RankingSession`] wraps the same operations
//! for callers that want the judging loop managed for them.
//!
//! # Quick start
//!
//! ```rust
//! use duelrank_core::{
//!     get_ranked_order, initialize_items, is_stable, record_comparison,
//!     select_next_pair, PairingMode,
//! };
//!
//! let mut items = initialize_items(["coffee", "tea", "mate"]);
//!
//! while !is_stable(&items) {
//!     let (first, second) = select_next_pair(&items, PairingMode::Standard)
//!         .expect("two or more items");
//!     // Ask the judge; here the first-shown item always wins.
//!     items = record_comparison(&items, first.id(), second.id())?;
//! }
//!
//! for item in get_ranked_order(&items) {
//!     println!("{:>5}  {}", item.rating(), item.name());
//! }
//! # Ok::<(), duelrank_core::RankError>(())
//! ```

pub mod constants;
pub mod convergence;
pub mod engine;
pub mod pairing;
pub mod scoring;
pub mod types;

// Re-export the primary public API at the crate root.
pub use convergence::{estimate_required_comparisons, is_stable};
pub use engine::{RankingSession, SessionConfig};
pub use pairing::{select_next_pair, select_next_pair_with_rng, PairingMode};
pub use scoring::{
    apply_outcome, expected_score, get_ranked_order, record_comparison, record_comparison_with_k,
};
pub use types::{initialize_items, ComparisonOutcome, Matchup, RankError, RankableItem};
