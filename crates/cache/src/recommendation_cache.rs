//! TTL-boxed cache of generated recommendation lists.

use std::time::Duration;

use playdeck_db::models::game::Game;

use crate::store::ListStore;

/// Caches ordered game lists as one JSON document per entry, with a
/// fixed expiry applied on every write.
///
/// The cache is best-effort throughout: a failed read is a miss, a
/// failed write is logged and dropped, and concurrent regenerations for
/// the same key are allowed to race (last write wins; generation is
/// idempotent).
pub struct RecommendationCache<S: ListStore> {
    store: S,
    ttl: Duration,
}

impl<S: ListStore> RecommendationCache<S> {
    pub fn new(store: S, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Look up a cached list. `None` means miss, whether because the key
    /// is absent, empty, unreadable, or held no decodable entries.
    pub async fn get(&self, key: &str) -> Option<Vec<Game>> {
        let entries = match self.store.range_all(key).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache read failed, treating as miss");
                return None;
            }
        };
        if entries.is_empty() {
            return None;
        }

        let mut games = Vec::with_capacity(entries.len());
        for entry in &entries {
            match serde_json::from_str::<Game>(entry) {
                Ok(game) => games.push(game),
                Err(err) => {
                    tracing::warn!(key, error = %err, "Skipping undecodable cache entry");
                }
            }
        }
        if games.is_empty() {
            return None;
        }

        tracing::debug!(key, count = games.len(), "Recommendation cache hit");
        Some(games)
    }

    /// Replace the list at `key` with `games` and reset its expiry.
    /// Best-effort: failures are logged, never surfaced.
    pub async fn put(&self, key: &str, games: &[Game]) {
        if let Err(err) = self.store.delete(key).await {
            tracing::warn!(key, error = %err, "Cache clear before write failed");
            return;
        }
        if games.is_empty() {
            // Nothing to cache; leaving the key absent forces the next
            // request to regenerate.
            return;
        }

        let mut entries = Vec::with_capacity(games.len());
        for game in games {
            match serde_json::to_string(game) {
                Ok(json) => entries.push(json),
                Err(err) => {
                    tracing::warn!(key, error = %err, "Failed to serialize game for cache");
                    return;
                }
            }
        }

        if let Err(err) = self.store.push_all(key, &entries).await {
            tracing::warn!(key, error = %err, "Cache write failed");
            return;
        }
        if let Err(err) = self.store.expire(key, self.ttl).await {
            tracing::warn!(key, error = %err, "Cache expire failed");
        }
        tracing::debug!(key, count = entries.len(), "Cached recommendation list");
    }

    /// Delete the list at `key` outright, forcing regeneration on the
    /// next read. Best-effort.
    pub async fn invalidate(&self, key: &str) {
        match self.store.delete(key).await {
            Ok(()) => tracing::debug!(key, "Invalidated cached recommendations"),
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache invalidation failed");
            }
        }
    }

    /// Return the cached list at `key`, or invoke `generate`, cache its
    /// result, and return it.
    ///
    /// Only generation errors surface; cache failures on either side
    /// degrade to generating (read) or to an uncached result (write).
    pub async fn get_or_generate<F, Fut, E>(&self, key: &str, generate: F) -> Result<Vec<Game>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<Game>, E>>,
    {
        if let Some(games) = self.get(key).await {
            return Ok(games);
        }

        let games = generate().await?;
        self.put(key, &games).await;
        Ok(games)
    }
}
