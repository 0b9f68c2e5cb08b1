//! Service facade consumed by the HTTP layer.
//!
//! Four operations: fetch personalized recommendations, fetch the
//! anonymous fallback, record an interaction, record a feed exposure.
//! All take plain ids and primitives and return models or a
//! [`RecommendError`].

use std::future::Future;

use playdeck_cache::keys;
use playdeck_cache::{ListStore, RecommendationCache};
use playdeck_core::config::RecommendationConfig;
use playdeck_core::error::CoreError;
use playdeck_core::interaction::Interaction;
use playdeck_db::models::game::Game;
use playdeck_db::repositories::{GameRepo, InteractionRepo, SeenGameRepo};
use playdeck_db::DbPool;

use crate::error::{RecommendError, RecommendResult};
use crate::generator::RecommendationGenerator;

/// Entry point for the recommendation subsystem.
///
/// Generic over the cache's backing [`ListStore`] so tests run against
/// the in-memory store while production wires up Redis.
pub struct RecommendationService<S: ListStore> {
    pool: DbPool,
    cache: RecommendationCache<S>,
    generator: RecommendationGenerator,
    config: RecommendationConfig,
}

impl<S: ListStore> RecommendationService<S> {
    pub fn new(pool: DbPool, store: S, config: RecommendationConfig) -> Self {
        let cache = RecommendationCache::new(store, config.cache_ttl);
        let generator = RecommendationGenerator::new(pool.clone(), config.clone());
        Self {
            pool,
            cache,
            generator,
            config,
        }
    }

    /// One page of a user's personalized recommendations, plus the total
    /// length of the underlying list.
    ///
    /// The cache always holds the full generated list; pagination is
    /// applied here, identically on cache hits and misses.
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        page: i64,
        limit: i64,
    ) -> RecommendResult<(Vec<Game>, i64)> {
        let key = keys::user_key(user_id);

        let full = self
            .cache
            .get_or_generate(&key, || {
                self.bounded(self.generator.generate_personalized(user_id))
            })
            .await?;

        let total = full.len() as i64;
        Ok((paginate(full, page, limit), total))
    }

    /// One page of the anonymous fallback list.
    ///
    /// Each (page, limit) pair is generated and cached independently, so
    /// the cached list is already exactly the requested page.
    pub async fn get_fallback_recommendations(
        &self,
        page: i64,
        limit: i64,
    ) -> RecommendResult<(Vec<Game>, i64)> {
        let key = keys::fallback_key(page, limit);

        let games = self
            .cache
            .get_or_generate(&key, || {
                self.bounded(self.generator.generate_fallback(page, limit))
            })
            .await?;

        let total = games.len() as i64;
        Ok((games, total))
    }

    /// Durably record one interaction: upsert the per-(user, game)
    /// aggregate row and bump the game's counters in a single
    /// transaction, then evaluate cache invalidation.
    ///
    /// The invalidation step is a secondary effect: once the transaction
    /// has committed, its failures are logged and never surfaced, so the
    /// interaction stays recorded.
    pub async fn record_interaction(
        &self,
        user_id: &str,
        interaction: Interaction,
    ) -> RecommendResult<()> {
        let game_id = interaction.game_id();

        let mut tx = self.pool.begin().await?;

        // Counters first: a zero-row update means the game is gone, and
        // dropping the transaction rolls everything back.
        let found = match interaction {
            Interaction::Play {
                game_id,
                play_time_secs,
            } => GameRepo::bump_play(&mut tx, game_id, play_time_secs).await?,
            Interaction::Like { game_id } => GameRepo::bump_like(&mut tx, game_id).await?,
            Interaction::Bookmark { game_id } => GameRepo::bump_bookmark(&mut tx, game_id).await?,
        };
        if !found {
            return Err(CoreError::NotFound {
                entity: "game",
                id: game_id.to_string(),
            }
            .into());
        }

        match interaction {
            Interaction::Play {
                game_id,
                play_time_secs,
            } => {
                InteractionRepo::record_play(&mut tx, user_id, game_id, play_time_secs).await?;
            }
            Interaction::Like { game_id } => {
                InteractionRepo::record_like(&mut tx, user_id, game_id).await?;
            }
            Interaction::Bookmark { game_id } => {
                InteractionRepo::record_bookmark(&mut tx, user_id, game_id).await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            user_id = %user_id,
            game_id = %game_id,
            kind = interaction.kind(),
            "Recorded interaction"
        );

        self.maybe_invalidate(user_id).await;
        Ok(())
    }

    /// Record that a game was shown to a user just now. Idempotent per
    /// (user, game); a repeat call only moves `seen_at` forward.
    pub async fn record_seen_game(&self, user_id: &str, game_id: uuid::Uuid) -> RecommendResult<()> {
        let seen = SeenGameRepo::upsert_seen(&self.pool, user_id, game_id).await?;

        tracing::debug!(
            user_id = %user_id,
            game_id = %game_id,
            seen_at = %seen.seen_at,
            "Recorded seen game"
        );
        Ok(())
    }

    /// Delete the user's cached list when their recent interaction count
    /// reaches the configured threshold.
    ///
    /// The count is deliberately coarse: every interaction kind against
    /// every game within the trailing cache-TTL window qualifies.
    async fn maybe_invalidate(&self, user_id: &str) {
        let since = chrono::Utc::now()
            - chrono::Duration::seconds(self.config.cache_ttl.as_secs() as i64);

        match InteractionRepo::count_recent(&self.pool, user_id, since).await {
            Ok(count) if count >= self.config.invalidation_threshold => {
                tracing::debug!(user_id = %user_id, count, "Invalidation threshold reached");
                self.cache.invalidate(&keys::user_key(user_id)).await;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "Invalidation check failed");
            }
        }
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = RecommendResult<T>>,
    ) -> RecommendResult<T> {
        tokio::time::timeout(self.config.generation_timeout, fut)
            .await
            .map_err(|_| RecommendError::Timeout(self.config.generation_timeout))?
    }
}

/// Slice one 1-based page out of a full list.
///
/// Pages past the end are empty, a partial final page is returned
/// as-is, and a non-positive limit yields nothing.
fn paginate(games: Vec<Game>, page: i64, limit: i64) -> Vec<Game> {
    if limit <= 0 {
        return Vec::new();
    }
    let page = page.max(1);
    // Saturating so absurd page/limit pairs slice nothing rather than
    // wrapping.
    let start = (page - 1).saturating_mul(limit) as usize;
    if start >= games.len() {
        return Vec::new();
    }
    let end = start.saturating_add(limit as usize).min(games.len());
    games[start..end].to_vec()
}
