//! Named engine constants.
//!
//! Callers that need different tuning pass values explicitly (see
//! `SessionConfig`); nothing here is mutable process state.

/// Rating assigned to every item before any comparisons are recorded.
/// 1500 is the conventional Elo center point; only rating differences carry
/// meaning, not absolute values.
pub const DEFAULT_RATING: i32 = 1500;

/// Default K-factor: the maximum rating swing a single comparison can
/// produce. Larger values converge faster but keep oscillating once the
/// ordering has roughly settled.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// How many of the nearest-rated opponents stay eligible when choosing the
/// second half of a matchup.
///
/// The primary item is chosen for coverage (fewest comparisons); its
/// opponent is chosen for informativeness. Comparisons between items of
/// similar rating carry the most information, so only the closest-rated
/// opponents are kept, with the final pick made uniformly among them so
/// repeated requests don't collapse into the same matchup every time.
pub const CANDIDATE_POOL_SIZE: usize = 3;

/// Rating distance treated as "still interesting" by the express filter.
///
/// At 200 points the expected score is already about 0.76, and the verdict
/// is usually obvious to a human judge. Express mode drops opponents beyond
/// this window whenever at least one closer opponent exists; it never
/// refuses to produce a pair on its own.
pub const EXPRESS_RATING_WINDOW: i32 = 200;

/// Comparisons each item must accumulate before the ranking counts as
/// stable. Two per item is the floor at which every rating has been probed
/// more than once.
pub const STABLE_COMPARISONS_PER_ITEM: u32 = 2;
