//! Candidate list assembly.
//!
//! Personalized lists are built genre-first from the user's affinity
//! ranking, then topped up from the popularity mix; anonymous fallback
//! lists are the popularity mix alone, paginated. Candidates are
//! deduplicated by game id while concatenating, so no game appears
//! twice in one list.

use std::collections::HashSet;

use playdeck_core::config::RecommendationConfig;
use playdeck_core::scoring;
use playdeck_core::types::{GameId, Timestamp};
use playdeck_db::models::game::Game;
use playdeck_db::repositories::{GameRepo, InteractionRepo};
use playdeck_db::DbPool;

use crate::error::RecommendResult;

/// Produces ordered candidate lists for one request.
///
/// Holds shared handles only; one instance serves all request tasks.
#[derive(Clone)]
pub struct RecommendationGenerator {
    pool: DbPool,
    config: RecommendationConfig,
}

impl RecommendationGenerator {
    pub fn new(pool: DbPool, config: RecommendationConfig) -> Self {
        Self { pool, config }
    }

    /// Build a personalized list for `user_id`.
    ///
    /// The result holds at most `target_size` games and may hold fewer
    /// when the catalog is small; a user with no interaction history
    /// falls through entirely to the popularity mix. Any database error
    /// aborts generation; partial lists are never returned on failure.
    pub async fn generate_personalized(&self, user_id: &str) -> RecommendResult<Vec<Game>> {
        let interactions = InteractionRepo::list_for_user(&self.pool, user_id).await?;

        // Genre affinity over the user's history. Rows whose game has
        // vanished from the catalog are skipped, not fatal.
        let mut rows = Vec::with_capacity(interactions.len());
        for interaction in &interactions {
            match GameRepo::find_by_id(&self.pool, interaction.game_id).await? {
                Some(game) => rows.push((game.genre_id, interaction.engagement())),
                None => {
                    tracing::debug!(
                        game_id = %interaction.game_id,
                        "Skipping interaction with missing game"
                    );
                }
            }
        }
        let genre_scores = scoring::genre_affinity_scores(rows);

        let seen_after = self.seen_cutoff();
        let mut recommendations: Vec<Game> = Vec::with_capacity(self.config.target_size);
        let mut picked: HashSet<GameId> = HashSet::new();

        // Genre passes, best genre first, until the internal quota
        // (half the target size) is reached. The quota is a generation
        // budget and is independent of the caller's page size.
        for genre_score in &genre_scores {
            let candidates = GameRepo::genre_candidates(
                &self.pool,
                genre_score.genre_id,
                user_id,
                seen_after,
                self.config.genre_batch_size,
            )
            .await?;
            merge_unique(&mut recommendations, &mut picked, candidates);

            if recommendations.len() >= self.config.genre_quota() {
                break;
            }
        }

        // Top up any shortfall from the popularity mix, still excluding
        // recently seen games.
        if recommendations.len() < self.config.target_size {
            let shortfall = (self.config.target_size - recommendations.len()) as i64;
            let popular =
                GameRepo::popular_mixed_for_user(&self.pool, user_id, seen_after, shortfall)
                    .await?;
            merge_unique(&mut recommendations, &mut picked, popular);
        }

        tracing::debug!(
            user_id = %user_id,
            genres = genre_scores.len(),
            count = recommendations.len(),
            "Generated personalized recommendations"
        );
        Ok(recommendations)
    }

    /// Build one page of the anonymous fallback list: the popularity mix
    /// with offset pagination and no seen-game exclusion.
    pub async fn generate_fallback(&self, page: i64, limit: i64) -> RecommendResult<Vec<Game>> {
        let games = GameRepo::popular_mixed(&self.pool, page_offset(page, limit), limit).await?;

        tracing::debug!(page, limit, count = games.len(), "Generated fallback recommendations");
        Ok(games)
    }

    fn seen_cutoff(&self) -> Timestamp {
        chrono::Utc::now()
            - chrono::Duration::seconds(self.config.seen_game_threshold.as_secs() as i64)
    }
}

/// Append `candidates` to `dst`, skipping game ids already in `picked`.
fn merge_unique(dst: &mut Vec<Game>, picked: &mut HashSet<GameId>, candidates: Vec<Game>) {
    for game in candidates {
        if picked.insert(game.id) {
            dst.push(game);
        }
    }
}

/// Row offset for 1-based page numbers; pages below 1 clamp to the
/// first page. Saturating so absurd page/limit pairs cannot wrap.
fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit).max(0)
}
