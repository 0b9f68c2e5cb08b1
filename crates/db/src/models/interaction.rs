//! Per-(user, game) interaction aggregate entity.

use playdeck_core::scoring::EngagementCounts;
use playdeck_core::types::{GameId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_game_interactions` table.
///
/// One row per (user, game) pair; counters are cumulative and only ever
/// incremented (soft deletion is handled outside this core).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserGameInteraction {
    pub id: i64,
    pub user_id: UserId,
    pub game_id: GameId,
    pub play_count: i64,
    /// Cumulative play time in seconds.
    pub play_time: i64,
    pub like_count: i64,
    pub bookmark_count: i64,
    pub comment_count: i64,
    pub last_interaction: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserGameInteraction {
    /// Projection read by the affinity scorer.
    pub fn engagement(&self) -> EngagementCounts {
        EngagementCounts {
            play_count: self.play_count,
            play_time: self.play_time,
            like_count: self.like_count,
            bookmark_count: self.bookmark_count,
        }
    }
}
