//! Cache key construction.
//!
//! Personalized lists are keyed per user; fallback lists are keyed per
//! (page, limit) pair, so each distinct anonymous pagination request is
//! generated and cached independently.

/// Key for a user's personalized recommendation list.
pub fn user_key(user_id: &str) -> String {
    format!("user:{user_id}:recommendations")
}

/// Key for one page of the anonymous fallback list.
pub fn fallback_key(page: i64, limit: i64) -> String {
    format!("fallback:recommendations:{page}:{limit}")
}
