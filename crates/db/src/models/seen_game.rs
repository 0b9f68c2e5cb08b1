use playdeck_core::types::{GameId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_seen_games` table.
///
/// At most one row per (user, game); `seen_at` is last-write-wins.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSeenGame {
    pub user_id: UserId,
    pub game_id: GameId,
    pub seen_at: Timestamp,
}
