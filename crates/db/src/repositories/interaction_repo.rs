//! Repository for the `user_game_interactions` table.
//!
//! All writes are single-statement upserts using
//! `INSERT ... ON CONFLICT ... DO UPDATE SET x = x + delta`, so
//! concurrent interactions for the same (user, game) pair never lose
//! increments.

use playdeck_core::types::{GameId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::interaction::UserGameInteraction;

/// Column list for `user_game_interactions` queries.
const COLUMNS: &str = "\
    id, user_id, game_id, play_count, play_time, like_count, \
    bookmark_count, comment_count, last_interaction, created_at, updated_at";

/// Provides reads and atomic upserts for user-game interaction rows.
pub struct InteractionRepo;

impl InteractionRepo {
    /// All interaction rows for one user.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<UserGameInteraction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_game_interactions WHERE user_id = $1");
        sqlx::query_as::<_, UserGameInteraction>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Record a play session: `play_count + 1`, `play_time + secs`.
    pub async fn record_play(
        conn: &mut PgConnection,
        user_id: &str,
        game_id: GameId,
        play_time_secs: i64,
    ) -> Result<UserGameInteraction, sqlx::Error> {
        Self::upsert(conn, user_id, game_id, 1, play_time_secs, 0, 0).await
    }

    /// Record a like: `like_count + 1`.
    pub async fn record_like(
        conn: &mut PgConnection,
        user_id: &str,
        game_id: GameId,
    ) -> Result<UserGameInteraction, sqlx::Error> {
        Self::upsert(conn, user_id, game_id, 0, 0, 1, 0).await
    }

    /// Record a bookmark: `bookmark_count + 1`.
    pub async fn record_bookmark(
        conn: &mut PgConnection,
        user_id: &str,
        game_id: GameId,
    ) -> Result<UserGameInteraction, sqlx::Error> {
        Self::upsert(conn, user_id, game_id, 0, 0, 0, 1).await
    }

    /// Count interactions for a user whose `last_interaction` falls after
    /// `since`. Coarse by design: every interaction kind and every game
    /// counts toward cache invalidation.
    pub async fn count_recent(
        pool: &PgPool,
        user_id: &str,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_game_interactions \
             WHERE user_id = $1 AND last_interaction > $2",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(pool)
        .await
    }

    /// Single row lookup, used by tests and the service's not-found
    /// checks.
    pub async fn find(
        pool: &PgPool,
        user_id: &str,
        game_id: GameId,
    ) -> Result<Option<UserGameInteraction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_game_interactions \
             WHERE user_id = $1 AND game_id = $2"
        );
        sqlx::query_as::<_, UserGameInteraction>(&query)
            .bind(user_id)
            .bind(game_id)
            .fetch_optional(pool)
            .await
    }

    async fn upsert(
        conn: &mut PgConnection,
        user_id: &str,
        game_id: GameId,
        play_delta: i64,
        play_time_delta: i64,
        like_delta: i64,
        bookmark_delta: i64,
    ) -> Result<UserGameInteraction, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_game_interactions \
                 (user_id, game_id, play_count, play_time, like_count, bookmark_count) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id, game_id) DO UPDATE SET \
                 play_count = user_game_interactions.play_count + $3, \
                 play_time = user_game_interactions.play_time + $4, \
                 like_count = user_game_interactions.like_count + $5, \
                 bookmark_count = user_game_interactions.bookmark_count + $6, \
                 last_interaction = NOW(), \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserGameInteraction>(&query)
            .bind(user_id)
            .bind(game_id)
            .bind(play_delta)
            .bind(play_time_delta)
            .bind(like_delta)
            .bind(bookmark_delta)
            .fetch_one(conn)
            .await?;

        tracing::trace!(
            user_id = %user_id,
            game_id = %game_id,
            play_count = row.play_count,
            "Upserted interaction row"
        );
        Ok(row)
    }
}
