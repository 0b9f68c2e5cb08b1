//! Integration tests for recommendation generation, caching, and
//! invalidation.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use common::{backdate_seen, seed_game, seed_genre, test_service, test_service_with};
use playdeck_cache::keys;
use playdeck_cache::ListStore;
use playdeck_core::config::RecommendationConfig;
use playdeck_core::interaction::Interaction;
use playdeck_core::types::GameId;
use playdeck_recommend::RecommendError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: a user with no history gets exactly the popularity mix
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn personalized_without_history_matches_popularity_fallback(pool: PgPool) {
    let genre = seed_genre(&pool, "arcade").await;
    for (i, plays) in [40, 10, 90, 25, 5].iter().enumerate() {
        seed_game(&pool, genre, &format!("game-{i}"), *plays, 0).await;
    }

    let (service, _) = test_service(pool);

    let (personalized, _) = service.get_recommendations("u-fresh", 1, 25).await.unwrap();
    let (fallback, _) = service.get_fallback_recommendations(1, 25).await.unwrap();

    let personalized_ids: Vec<GameId> = personalized.iter().map(|g| g.id).collect();
    let fallback_ids: Vec<GameId> = fallback.iter().map(|g| g.id).collect();
    assert_eq!(personalized_ids, fallback_ids);
}

// ---------------------------------------------------------------------------
// Test: higher-affinity genres surface before lower-affinity genres
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn genre_blocks_follow_affinity_order(pool: PgPool) {
    let puzzle = seed_genre(&pool, "puzzle").await;
    let racing = seed_genre(&pool, "racing").await;

    let favourite = seed_game(&pool, puzzle, "favourite", 100, 0).await;
    seed_game(&pool, puzzle, "puzzle-b", 80, 0).await;
    seed_game(&pool, puzzle, "puzzle-c", 60, 0).await;
    let tried_once = seed_game(&pool, racing, "tried-once", 90, 0).await;
    seed_game(&pool, racing, "racing-b", 70, 0).await;

    let (service, _) = test_service(pool.clone());

    // Heavy engagement with the puzzle genre (affinity 10*3 + 2*2 = 34),
    // one racing play (affinity 3).
    for _ in 0..10 {
        service
            .record_interaction(
                "u1",
                Interaction::Play {
                    game_id: favourite.id,
                    play_time_secs: 0,
                },
            )
            .await
            .unwrap();
    }
    for _ in 0..2 {
        service
            .record_interaction("u1", Interaction::Like { game_id: favourite.id })
            .await
            .unwrap();
    }
    service
        .record_interaction(
            "u1",
            Interaction::Play {
                game_id: tried_once.id,
                play_time_secs: 0,
            },
        )
        .await
        .unwrap();

    let (games, _) = service.get_recommendations("u1", 1, 25).await.unwrap();

    let last_puzzle = games
        .iter()
        .rposition(|g| g.genre_id == puzzle)
        .expect("expected puzzle games");
    let first_racing = games
        .iter()
        .position(|g| g.genre_id == racing)
        .expect("expected racing games");
    assert!(
        last_puzzle < first_racing,
        "puzzle candidates must precede racing candidates"
    );

    // Neither interacted game was seen, so both may appear.
    assert!(games.iter().any(|g| g.id == favourite.id));
}

// ---------------------------------------------------------------------------
// Test: recently seen games are excluded, older sightings are not
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn seen_window_excludes_recent_sightings_only(pool: PgPool) {
    let genre = seed_genre(&pool, "arcade").await;
    let played = seed_game(&pool, genre, "played", 50, 0).await;
    let shown = seed_game(&pool, genre, "shown", 40, 0).await;
    seed_game(&pool, genre, "untouched", 30, 0).await;

    let (service, store) = test_service(pool.clone());

    service
        .record_interaction(
            "u1",
            Interaction::Play {
                game_id: played.id,
                play_time_secs: 60,
            },
        )
        .await
        .unwrap();
    service.record_seen_game("u1", shown.id).await.unwrap();

    let (games, _) = service.get_recommendations("u1", 1, 25).await.unwrap();
    assert!(
        !games.iter().any(|g| g.id == shown.id),
        "a game seen moments ago must be excluded"
    );

    // Push the sighting outside the 3-day window and drop the cached
    // list; the game becomes eligible again.
    backdate_seen(&pool, "u1", shown.id, 4).await;
    store.delete(&keys::user_key("u1")).await.unwrap();

    let (games, _) = service.get_recommendations("u1", 1, 25).await.unwrap();
    assert!(games.iter().any(|g| g.id == shown.id));
}

// ---------------------------------------------------------------------------
// Test: cache hits serve the stored list without regenerating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn cached_list_is_served_until_invalidated(pool: PgPool) {
    let genre = seed_genre(&pool, "arcade").await;
    seed_game(&pool, genre, "original", 50, 0).await;

    let (service, store) = test_service(pool.clone());

    let (first, _) = service.get_recommendations("u1", 1, 25).await.unwrap();
    assert!(!store
        .range_all(&keys::user_key("u1"))
        .await
        .unwrap()
        .is_empty());

    // New catalog entries do not appear while the cached list lives.
    seed_game(&pool, genre, "newcomer", 500, 0).await;
    let (second, _) = service.get_recommendations("u1", 1, 25).await.unwrap();
    assert_eq!(
        first.iter().map(|g| g.id).collect::<Vec<_>>(),
        second.iter().map(|g| g.id).collect::<Vec<_>>()
    );
}

// ---------------------------------------------------------------------------
// Test: the same page comes back on hit and on miss
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn pagination_is_uniform_across_hit_and_miss(pool: PgPool) {
    let genre = seed_genre(&pool, "arcade").await;
    for i in 0..8 {
        seed_game(&pool, genre, &format!("game-{i}"), 100 - i, 0).await;
    }

    let (service, _) = test_service(pool);

    let (miss_page, miss_total) = service.get_recommendations("u1", 2, 3).await.unwrap();
    let (hit_page, hit_total) = service.get_recommendations("u1", 2, 3).await.unwrap();

    assert_eq!(miss_total, 8);
    assert_eq!(hit_total, 8);
    assert_eq!(miss_page.len(), 3);
    assert_eq!(
        miss_page.iter().map(|g| g.id).collect::<Vec<_>>(),
        hit_page.iter().map(|g| g.id).collect::<Vec<_>>()
    );
}

// ---------------------------------------------------------------------------
// Test: personalized lists never repeat a game id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn personalized_list_has_no_duplicates(pool: PgPool) {
    let genre = seed_genre(&pool, "arcade").await;
    let hit = seed_game(&pool, genre, "hit", 90, 10).await;
    seed_game(&pool, genre, "second", 50, 5).await;

    let (service, _) = test_service(pool);

    // The genre pass and the popularity fill both rank these games; the
    // merged list must still be unique.
    service
        .record_interaction(
            "u1",
            Interaction::Play {
                game_id: hit.id,
                play_time_secs: 120,
            },
        )
        .await
        .unwrap();

    let (games, _) = service.get_recommendations("u1", 1, 25).await.unwrap();
    let mut ids: Vec<GameId> = games.iter().map(|g| g.id).collect();
    let before = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), before, "list contained duplicate game ids");
}

// ---------------------------------------------------------------------------
// Test: fallback pagination returns distinct ranked slices per key
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn fallback_pages_are_distinct_ranked_slices(pool: PgPool) {
    let genre = seed_genre(&pool, "arcade").await;
    // Distinct play counts give a strict popularity order: game-0 is the
    // most played, game-11 the least.
    let mut ranked = Vec::new();
    for i in 0..12 {
        ranked.push(seed_game(&pool, genre, &format!("game-{i}"), 120 - 10 * i, 0).await);
    }

    let (service, store) = test_service(pool);

    let (page1, _) = service.get_fallback_recommendations(1, 5).await.unwrap();
    let (page2, _) = service.get_fallback_recommendations(2, 5).await.unwrap();

    let expected_page2: Vec<GameId> = ranked[5..10].iter().map(|g| g.id).collect();
    assert_eq!(page1.len(), 5);
    assert_eq!(page2.iter().map(|g| g.id).collect::<Vec<_>>(), expected_page2);

    // Each (page, limit) pair owns an independent cache entry.
    assert!(!store
        .range_all(&keys::fallback_key(1, 5))
        .await
        .unwrap()
        .is_empty());
    assert!(!store
        .range_all(&keys::fallback_key(2, 5))
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Test: five recent interactions evict the personalized cache entry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn interaction_volume_invalidates_personalized_cache(pool: PgPool) {
    let genre = seed_genre(&pool, "arcade").await;
    let mut games = Vec::new();
    for i in 0..5 {
        games.push(seed_game(&pool, genre, &format!("game-{i}"), 50 - i, 0).await);
    }

    let (service, store) = test_service(pool);
    let key = keys::user_key("u1");

    service.get_recommendations("u1", 1, 25).await.unwrap();
    assert!(!store.range_all(&key).await.unwrap().is_empty());

    // One interaction row per game; the fifth row crosses the threshold.
    for game in &games {
        service
            .record_interaction("u1", Interaction::Like { game_id: game.id })
            .await
            .unwrap();
    }

    assert!(
        store.range_all(&key).await.unwrap().is_empty(),
        "cache entry must be deleted after the invalidation threshold"
    );
}

// ---------------------------------------------------------------------------
// Test: an exhausted generation budget is an error and caches nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn exhausted_generation_budget_fails_without_caching(pool: PgPool) {
    let genre = seed_genre(&pool, "arcade").await;
    seed_game(&pool, genre, "game", 10, 0).await;

    let config = RecommendationConfig {
        generation_timeout: Duration::ZERO,
        ..RecommendationConfig::default()
    };
    let (service, store) = test_service_with(pool, config);

    let err = service.get_recommendations("u1", 1, 25).await.unwrap_err();
    assert_matches!(err, RecommendError::Timeout(_));

    assert!(
        store.range_all(&keys::user_key("u1")).await.unwrap().is_empty(),
        "a timed-out generation must not leave a cache entry"
    );
}
