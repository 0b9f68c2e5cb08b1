//! Shared fixtures for recommendation integration tests.

use std::sync::Arc;

use playdeck_cache::memory::InMemoryListStore;
use playdeck_core::config::RecommendationConfig;
use playdeck_core::types::{GameId, GenreId};
use playdeck_db::models::game::Game;
use playdeck_recommend::RecommendationService;
use sqlx::PgPool;

/// Build a service over the in-memory list store, returning the store
/// handle separately so tests can observe cache contents directly.
pub fn test_service(
    pool: PgPool,
) -> (
    RecommendationService<Arc<InMemoryListStore>>,
    Arc<InMemoryListStore>,
) {
    test_service_with(pool, RecommendationConfig::default())
}

/// Same as [`test_service`], with a caller-supplied config.
pub fn test_service_with(
    pool: PgPool,
    config: RecommendationConfig,
) -> (
    RecommendationService<Arc<InMemoryListStore>>,
    Arc<InMemoryListStore>,
) {
    let store = Arc::new(InMemoryListStore::new());
    let service = RecommendationService::new(pool, Arc::clone(&store), config);
    (service, store)
}

/// Insert a genre and return its id.
pub async fn seed_genre(pool: &PgPool, name: &str) -> GenreId {
    sqlx::query_scalar::<_, GenreId>("INSERT INTO genres (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("failed to seed genre")
}

/// Insert a game with the given denormalized counters.
pub async fn seed_game(
    pool: &PgPool,
    genre_id: GenreId,
    title: &str,
    play_count: i64,
    like_count: i64,
) -> Game {
    sqlx::query_as::<_, Game>(
        "INSERT INTO games (title, genre_id, play_count, like_count) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, title, genre_id, play_count, play_time, like_count, \
                   bookmark_count, comment_count, is_featured, is_deleted, \
                   created_at, updated_at",
    )
    .bind(title)
    .bind(genre_id)
    .bind(play_count)
    .bind(like_count)
    .fetch_one(pool)
    .await
    .expect("failed to seed game")
}

/// Move a seen-game row's timestamp into the past.
pub async fn backdate_seen(pool: &PgPool, user_id: &str, game_id: GameId, days: i64) {
    sqlx::query(
        "UPDATE user_seen_games \
         SET seen_at = NOW() - make_interval(days => $3::int) \
         WHERE user_id = $1 AND game_id = $2",
    )
    .bind(user_id)
    .bind(game_id)
    .bind(days)
    .execute(pool)
    .await
    .expect("failed to backdate seen game");
}
