//! Recommendation cache: a TTL-boxed list cache over a pluggable
//! key-value list store.
//!
//! The [`store::ListStore`] trait is the seam between cache semantics
//! and the backing store; production uses [`store::RedisListStore`],
//! tests and local development use [`memory::InMemoryListStore`].

pub mod keys;
pub mod memory;
pub mod recommendation_cache;
pub mod store;

pub use recommendation_cache::RecommendationCache;
pub use store::{ListStore, RedisListStore, StoreError};
