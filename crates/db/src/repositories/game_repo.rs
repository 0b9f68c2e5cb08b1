//! Repository for the `games` table: catalog reads used by the
//! recommendation generator, plus atomic counter increments.

use playdeck_core::types::{GameId, GenreId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::game::Game;

/// Column list for `games` queries.
const COLUMNS: &str = "\
    id, title, genre_id, play_count, play_time, like_count, \
    bookmark_count, comment_count, is_featured, is_deleted, \
    created_at, updated_at";

/// Same columns, qualified for joined queries.
const QUALIFIED_COLUMNS: &str = "\
    g.id, g.title, g.genre_id, g.play_count, g.play_time, g.like_count, \
    g.bookmark_count, g.comment_count, g.is_featured, g.is_deleted, \
    g.created_at, g.updated_at";

/// Popularity ordering expression over the game's own counters joined
/// with the per-game interaction aggregate. Must stay term-for-term in
/// step with `playdeck_core::scoring::popularity_score`.
const POPULARITY_ORDER: &str = "\
    (g.play_count + COALESCE(ugi.total_play_count, 0)) * 0.4 \
    + (g.like_count + COALESCE(ugi.total_like_count, 0)) * 0.3 \
    + COALESCE(ugi.total_play_time, 0) * 0.2 \
    - EXTRACT(EPOCH FROM (NOW() - g.created_at)) / 86400 * 0.1";

/// Per-game interaction aggregate subquery joined into popularity reads.
const INTERACTION_AGGREGATE: &str = "\
    SELECT game_id, \
           SUM(play_time) AS total_play_time, \
           SUM(play_count) AS total_play_count, \
           SUM(like_count) AS total_like_count \
    FROM user_game_interactions \
    GROUP BY game_id";

/// Provides catalog reads and counter updates for games.
pub struct GameRepo;

impl GameRepo {
    /// Fetch a single game by id.
    pub async fn find_by_id(pool: &PgPool, id: GameId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Candidate games in one genre for a user's personalized list.
    ///
    /// Excludes soft-deleted games and games the user has seen since
    /// `seen_after`; ordered by play count then like count, both
    /// descending.
    pub async fn genre_candidates(
        pool: &PgPool,
        genre_id: GenreId,
        user_id: &str,
        seen_after: Timestamp,
        limit: i64,
    ) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM games \
             WHERE genre_id = $1 \
               AND is_deleted = FALSE \
               AND id NOT IN ( \
                   SELECT game_id FROM user_seen_games \
                   WHERE user_id = $2 AND seen_at > $3) \
             ORDER BY play_count DESC, like_count DESC \
             LIMIT $4"
        );
        let games = sqlx::query_as::<_, Game>(&query)
            .bind(genre_id)
            .bind(user_id)
            .bind(seen_after)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        tracing::trace!(genre_id = %genre_id, count = games.len(), "Fetched genre candidates");
        Ok(games)
    }

    /// Games ranked by the popularity-mix formula, excluding games the
    /// user has seen since `seen_after`.
    pub async fn popular_mixed_for_user(
        pool: &PgPool,
        user_id: &str,
        seen_after: Timestamp,
        limit: i64,
    ) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} \
             FROM games g \
             LEFT JOIN ({INTERACTION_AGGREGATE}) ugi ON g.id = ugi.game_id \
             WHERE g.is_deleted = FALSE \
               AND g.id NOT IN ( \
                   SELECT game_id FROM user_seen_games \
                   WHERE user_id = $1 AND seen_at > $2) \
             ORDER BY {POPULARITY_ORDER} DESC \
             LIMIT $3"
        );
        let games = sqlx::query_as::<_, Game>(&query)
            .bind(user_id)
            .bind(seen_after)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        tracing::trace!(user_id = %user_id, count = games.len(), "Fetched popularity mix");
        Ok(games)
    }

    /// Games ranked by the popularity-mix formula with offset pagination
    /// and no seen-game exclusion (anonymous traffic).
    pub async fn popular_mixed(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} \
             FROM games g \
             LEFT JOIN ({INTERACTION_AGGREGATE}) ugi ON g.id = ugi.game_id \
             WHERE g.is_deleted = FALSE \
             ORDER BY {POPULARITY_ORDER} DESC \
             OFFSET $1 LIMIT $2"
        );
        let games = sqlx::query_as::<_, Game>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        tracing::trace!(offset, limit, count = games.len(), "Fetched popularity mix page");
        Ok(games)
    }

    /// Atomically bump a game's play counters after a play session.
    ///
    /// Returns `false` if no such game exists.
    pub async fn bump_play(
        conn: &mut PgConnection,
        game_id: GameId,
        play_time_secs: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE games SET \
                 play_count = play_count + 1, \
                 play_time = play_time + $2, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(game_id)
        .bind(play_time_secs)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(game_id = %game_id, "Counter bump matched no game");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Atomically bump a game's like count.
    pub async fn bump_like(conn: &mut PgConnection, game_id: GameId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE games SET like_count = like_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(game_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically bump a game's bookmark count.
    pub async fn bump_bookmark(
        conn: &mut PgConnection,
        game_id: GameId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE games SET bookmark_count = bookmark_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(game_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
