//! Scoring engine: pure functions ranking genres and games.
//!
//! Two scores drive recommendation assembly: a per-user genre affinity
//! accumulated from interaction history, and a cross-user popularity
//! value that decays with game age. Both are plain arithmetic over
//! counters; nothing here touches the database.

use crate::types::{GenreId, Timestamp};

// ---------------------------------------------------------------------------
// Affinity weights
// ---------------------------------------------------------------------------

/// Weight applied to each recorded play.
pub const AFFINITY_PLAY_WEIGHT: i64 = 3;
/// Play time contributes one point per this many seconds (truncating).
pub const AFFINITY_PLAY_TIME_DIVISOR: i64 = 60;
/// Weight applied to each like.
pub const AFFINITY_LIKE_WEIGHT: i64 = 2;
/// Weight applied to each bookmark.
pub const AFFINITY_BOOKMARK_WEIGHT: i64 = 1;

// ---------------------------------------------------------------------------
// Popularity weights
// ---------------------------------------------------------------------------

/// Weight on combined (own + aggregated) play count.
pub const POPULARITY_PLAY_WEIGHT: f64 = 0.4;
/// Weight on combined (own + aggregated) like count.
pub const POPULARITY_LIKE_WEIGHT: f64 = 0.3;
/// Weight on aggregated play time across all users.
pub const POPULARITY_PLAY_TIME_WEIGHT: f64 = 0.2;
/// Penalty per day of age since the game was created.
pub const POPULARITY_AGE_PENALTY: f64 = 0.1;

/// Seconds per day, for fractional age computation.
pub const SECS_PER_DAY: f64 = 86_400.0;

// ---------------------------------------------------------------------------
// Genre affinity
// ---------------------------------------------------------------------------

/// Cumulative engagement counters for one (user, game) pair.
///
/// A projection of the interaction row holding only what affinity
/// scoring reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementCounts {
    pub play_count: i64,
    /// Total play time in seconds.
    pub play_time: i64,
    pub like_count: i64,
    pub bookmark_count: i64,
}

/// One genre's accumulated affinity for a user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenreScore {
    pub genre_id: GenreId,
    pub score: f64,
}

/// Affinity contribution of a single interaction row.
///
/// Integer arithmetic throughout; `play_time` truncates at minute
/// granularity, so 59 seconds of play contribute nothing.
pub fn interaction_score(counts: &EngagementCounts) -> f64 {
    (counts.play_count * AFFINITY_PLAY_WEIGHT
        + counts.play_time / AFFINITY_PLAY_TIME_DIVISOR
        + counts.like_count * AFFINITY_LIKE_WEIGHT
        + counts.bookmark_count * AFFINITY_BOOKMARK_WEIGHT) as f64
}

/// Fold interaction rows into per-genre affinity, sorted descending.
///
/// Input is (genre of the interacted game, that row's counters); callers
/// skip rows whose game lookup failed before reaching this function.
/// The sort is stable and accumulation preserves first-seen genre order,
/// so equal scores keep input order.
pub fn genre_affinity_scores(
    rows: impl IntoIterator<Item = (GenreId, EngagementCounts)>,
) -> Vec<GenreScore> {
    let mut scores: Vec<GenreScore> = Vec::new();
    let mut index: std::collections::HashMap<GenreId, usize> = std::collections::HashMap::new();

    for (genre_id, counts) in rows {
        let contribution = interaction_score(&counts);
        match index.get(&genre_id) {
            Some(&i) => scores[i].score += contribution,
            None => {
                index.insert(genre_id, scores.len());
                scores.push(GenreScore {
                    genre_id,
                    score: contribution,
                });
            }
        }
    }

    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scores
}

// ---------------------------------------------------------------------------
// Popularity
// ---------------------------------------------------------------------------

/// Inputs to the popularity formula for one game.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopularityInputs {
    /// The game's own denormalized play count.
    pub own_play_count: i64,
    /// The game's own denormalized like count.
    pub own_like_count: i64,
    /// Sum of play counts over all interaction rows for the game.
    pub agg_play_count: i64,
    /// Sum of like counts over all interaction rows for the game.
    pub agg_like_count: i64,
    /// Sum of play time (seconds) over all interaction rows for the game.
    pub agg_play_time: i64,
}

/// Fractional age of a game in days at `now`.
pub fn age_in_days(created_at: Timestamp, now: Timestamp) -> f64 {
    (now - created_at).num_seconds() as f64 / SECS_PER_DAY
}

/// Cross-user popularity value; higher is better.
///
/// Unbounded and unnormalized, used only for descending ordering. The
/// popularity-mix SQL query orders by the same expression server-side;
/// the two must stay term-for-term identical.
pub fn popularity_score(inputs: &PopularityInputs, age_days: f64) -> f64 {
    (inputs.own_play_count + inputs.agg_play_count) as f64 * POPULARITY_PLAY_WEIGHT
        + (inputs.own_like_count + inputs.agg_like_count) as f64 * POPULARITY_LIKE_WEIGHT
        + inputs.agg_play_time as f64 * POPULARITY_PLAY_TIME_WEIGHT
        - age_days * POPULARITY_AGE_PENALTY
}
