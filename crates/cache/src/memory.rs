//! In-memory [`ListStore`] for tests and local development.
//!
//! TTLs are tracked against `tokio::time::Instant`, so tests running
//! under a paused tokio clock can advance time deterministically.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::store::{ListStore, StoreError};

struct Entry {
    items: Vec<String>,
    expires_at: Option<Instant>,
}

/// Process-local list store with lazy expiry.
#[derive(Default)]
pub struct InMemoryListStore {
    lists: Mutex<HashMap<String, Entry>>,
}

impl InMemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStore for InMemoryListStore {
    async fn push_all(&self, key: &str, entries: &[String]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut lists = self.lists.lock().await;
        let entry = lists.entry(key.to_string()).or_insert(Entry {
            items: Vec::new(),
            expires_at: None,
        });
        entry.items.extend(entries.iter().cloned());
        Ok(())
    }

    async fn range_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let mut lists = self.lists.lock().await;
        match lists.get(key) {
            Some(entry) => {
                if entry.expires_at.is_some_and(|at| Instant::now() >= at) {
                    lists.remove(key);
                    Ok(Vec::new())
                } else {
                    Ok(entry.items.clone())
                }
            }
            None => Ok(Vec::new()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.lists.lock().await.remove(key);
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut lists = self.lists.lock().await;
        if let Some(entry) = lists.get_mut(key) {
            entry.expires_at = Some(Instant::now() + ttl);
        }
        Ok(())
    }
}
