use std::time::Duration;

/// Tunables for recommendation generation, caching, and invalidation.
///
/// Passed explicitly into the service at construction so tests can
/// override individual knobs; there are no process-wide constants.
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// Window during which a game shown to a user is excluded from their
    /// personalized recommendations (default: 3 days).
    pub seen_game_threshold: Duration,
    /// Expiry applied to every cached recommendation list (default: 1 hour).
    /// Also the lookback window for the invalidation check.
    pub cache_ttl: Duration,
    /// Internal generation budget for a personalized list (default: 25).
    /// Independent of the caller's requested page size; the genre loop
    /// stops at half of this, and the popularity fill tops up to it.
    pub target_size: usize,
    /// Maximum games fetched per genre pass (default: 10).
    pub genre_batch_size: i64,
    /// Recent-interaction count at or above which a user's cached list is
    /// deleted (default: 5).
    pub invalidation_threshold: i64,
    /// Upper bound on a single generation run; exceeding it is a failure
    /// and the result is never cached (default: 10 seconds).
    pub generation_timeout: Duration,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            seen_game_threshold: Duration::from_secs(3 * 24 * 3600),
            cache_ttl: Duration::from_secs(3600),
            target_size: 25,
            genre_batch_size: 10,
            invalidation_threshold: 5,
            generation_timeout: Duration::from_secs(10),
        }
    }
}

impl RecommendationConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default  |
    /// |--------------------------------|----------|
    /// | `RECO_SEEN_THRESHOLD_SECS`     | `259200` |
    /// | `RECO_CACHE_TTL_SECS`          | `3600`   |
    /// | `RECO_TARGET_SIZE`             | `25`     |
    /// | `RECO_GENRE_BATCH_SIZE`        | `10`     |
    /// | `RECO_INVALIDATION_THRESHOLD`  | `5`      |
    /// | `RECO_GENERATION_TIMEOUT_SECS` | `10`     |
    ///
    /// Panics on unparsable values; misconfiguration should fail fast at
    /// startup rather than surface mid-request.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            seen_game_threshold: Duration::from_secs(env_u64(
                "RECO_SEEN_THRESHOLD_SECS",
                defaults.seen_game_threshold.as_secs(),
            )),
            cache_ttl: Duration::from_secs(env_u64(
                "RECO_CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )),
            target_size: env_u64("RECO_TARGET_SIZE", defaults.target_size as u64) as usize,
            genre_batch_size: env_u64("RECO_GENRE_BATCH_SIZE", defaults.genre_batch_size as u64)
                as i64,
            invalidation_threshold: env_u64(
                "RECO_INVALIDATION_THRESHOLD",
                defaults.invalidation_threshold as u64,
            ) as i64,
            generation_timeout: Duration::from_secs(env_u64(
                "RECO_GENERATION_TIMEOUT_SECS",
                defaults.generation_timeout.as_secs(),
            )),
        }
    }

    /// Half of [`target_size`](Self::target_size), the point at which the
    /// genre loop stops adding candidates.
    pub fn genre_quota(&self) -> usize {
        self.target_size / 2
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid u64, got '{raw}'")),
        Err(_) => default,
    }
}
