//! Repository for the `user_seen_games` table.

use playdeck_core::types::GameId;
use sqlx::PgPool;

use crate::models::seen_game::UserSeenGame;

/// Provides last-write-wins upserts of feed exposure timestamps.
pub struct SeenGameRepo;

impl SeenGameRepo {
    /// Mark a game as seen by a user right now.
    ///
    /// Idempotent per (user, game): a repeat call moves `seen_at` forward
    /// rather than adding a row.
    pub async fn upsert_seen(
        pool: &PgPool,
        user_id: &str,
        game_id: GameId,
    ) -> Result<UserSeenGame, sqlx::Error> {
        let seen = sqlx::query_as::<_, UserSeenGame>(
            "INSERT INTO user_seen_games (user_id, game_id, seen_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (user_id, game_id) DO UPDATE SET seen_at = EXCLUDED.seen_at \
             RETURNING user_id, game_id, seen_at",
        )
        .bind(user_id)
        .bind(game_id)
        .fetch_one(pool)
        .await?;

        tracing::trace!(user_id = %user_id, game_id = %game_id, "Upserted seen game");
        Ok(seen)
    }

    /// Single row lookup, used by tests.
    pub async fn find(
        pool: &PgPool,
        user_id: &str,
        game_id: GameId,
    ) -> Result<Option<UserSeenGame>, sqlx::Error> {
        sqlx::query_as::<_, UserSeenGame>(
            "SELECT user_id, game_id, seen_at FROM user_seen_games \
             WHERE user_id = $1 AND game_id = $2",
        )
        .bind(user_id)
        .bind(game_id)
        .fetch_optional(pool)
        .await
    }

    /// Count of rows for a (user, game) pair; the idempotence invariant
    /// says this never exceeds one.
    pub async fn count_for_pair(
        pool: &PgPool,
        user_id: &str,
        game_id: GameId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_seen_games WHERE user_id = $1 AND game_id = $2",
        )
        .bind(user_id)
        .bind(game_id)
        .fetch_one(pool)
        .await
    }
}
