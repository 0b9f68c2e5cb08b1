use std::time::Duration;

use playdeck_core::error::CoreError;

/// Error type for recommendation operations.
///
/// Cache failures never appear here: reads degrade to misses and writes
/// are best-effort. Only domain errors, database failures, and bounded
/// generation timeouts surface to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// A domain-level error from `playdeck_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generation exceeded its configured bound. The partial result is
    /// discarded and never cached.
    #[error("Recommendation generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Convenience alias for service and generator return values.
pub type RecommendResult<T> = Result<T, RecommendError>;
