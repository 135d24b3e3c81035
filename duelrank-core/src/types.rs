//! Core data model.
//!
//! Items are identified by opaque `String` ids assigned at creation time and
//! never reused. Collections of items are treated as immutable snapshots:
//! engine operations take a slice and return a fresh `Vec`, never mutating
//! the caller's copy.

use thiserror::Error;
use uuid::Uuid;

use crate::constants::DEFAULT_RATING;

/// One item under ranking.
///
/// Fields are private on purpose: the working set changes only through the
/// engine's operations (initialization, recording a comparison, session
/// add/remove), so invariants like a monotone comparison counter hold by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankableItem {
    id: String,
    name: String,
    rating: i32,
    comparison_count: u32,
}

impl RankableItem {
    /// Create a fresh item with a new unique id, the default rating, and no
    /// comparison history.
    ///
    /// Panics on an empty or whitespace-only name; names come from the
    /// caller's input layer, which filters blanks before they reach the
    /// engine.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.trim().is_empty(), "item name must be non-empty");
        RankableItem {
            id: Uuid::new_v4().to_string(),
            name,
            rating: DEFAULT_RATING,
            comparison_count: 0,
        }
    }

    /// Unique, stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label supplied by the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current strength estimate.
    pub fn rating(&self) -> i32 {
        self.rating
    }

    /// How many recorded comparisons this item has participated in.
    pub fn comparison_count(&self) -> u32 {
        self.comparison_count
    }

    /// Copy with the new rating and the comparison counter bumped by one.
    pub(crate) fn with_recorded_result(&self, new_rating: i32) -> Self {
        RankableItem {
            id: self.id.clone(),
            name: self.name.clone(),
            rating: new_rating,
            comparison_count: self.comparison_count + 1,
        }
    }
}

/// Build the initial working set from an ordered list of names.
///
/// Every item starts at the default rating with zero comparisons; input
/// order is preserved.
pub fn initialize_items<I, S>(names: I) -> Vec<RankableItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(RankableItem::new).collect()
}

/// An ordered matchup: the two items to present, already coin-flipped for
/// display position.
pub type Matchup = (RankableItem, RankableItem);

/// The result of showing a matchup to the judge.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComparisonOutcome {
    /// The judge picked a winner.
    Decided { winner_id: String, loser_id: String },
    /// The judge declined to rate this matchup. No ratings change; the next
    /// pair request selects again.
    Skipped,
}

/// Errors the engine reports to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    /// A comparison referenced an id that is not in the working set. The
    /// working set is left untouched. Ids always come from the same
    /// collection being updated, so hitting this means a data-integrity bug
    /// in the caller, not a user-recoverable state.
    #[error("unknown item id: {0}")]
    UnknownItem(String),
}
