//! Game catalog entity (read-and-rank slice).

use playdeck_core::types::{GameId, GenreId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `games` table.
///
/// The recommendation core reads and ranks these and atomically bumps the
/// aggregate counters; everything else about a game is owned by the
/// catalog service.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub genre_id: GenreId,
    pub play_count: i64,
    /// Cumulative play time in seconds, across all users.
    pub play_time: i64,
    pub like_count: i64,
    pub bookmark_count: i64,
    pub comment_count: i64,
    pub is_featured: bool,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
