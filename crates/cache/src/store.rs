//! The list-store seam and its Redis implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Failure talking to the backing store.
///
/// Callers treat read failures as cache misses and write failures as
/// best-effort losses; neither fails a request.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Minimal key-value list store the recommendation cache needs:
/// push-list, range-read, delete, and expire-with-TTL.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Append `entries` in order to the list at `key`.
    async fn push_all(&self, key: &str, entries: &[String]) -> Result<(), StoreError>;

    /// Read the entire list at `key`, in push order. Missing key reads
    /// as an empty list.
    async fn range_all(&self, key: &str) -> Result<Vec<String>, StoreError>;

    /// Delete the list at `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Set the time-to-live of the list at `key`.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: ListStore + ?Sized> ListStore for std::sync::Arc<S> {
    async fn push_all(&self, key: &str, entries: &[String]) -> Result<(), StoreError> {
        (**self).push_all(key, entries).await
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
        (**self).range_all(key).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        (**self).expire(key, ttl).await
    }
}

/// Redis-backed [`ListStore`] over a multiplexed connection manager.
///
/// The manager is cheaply cloneable and reconnects on its own; one
/// instance is shared by all request tasks.
#[derive(Clone)]
pub struct RedisListStore {
    conn: ConnectionManager,
}

impl RedisListStore {
    /// Connect to Redis at `redis_url`.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection manager.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ListStore for RedisListStore {
    async fn push_all(&self, key: &str, entries: &[String]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(key, entries).await?;
        Ok(())
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        Ok(conn.lrange(key, 0, -1).await?)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.expire::<_, ()>(key, ttl.as_secs() as i64).await?;
        Ok(())
    }
}
