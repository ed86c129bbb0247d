use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{game_queries, pick_queries, profile_queries, weekly_result_queries};
use crate::league::awards::{self, SeasonData};
use crate::league::leaderboard;
use crate::league::player_stats;
use crate::league::validation::{ScopeError, ScopeValidator};
use crate::models::scope::SeasonScope;
use crate::models::stats::{LeaderboardEntry, MyStats, SeasonAwards, UserSummary};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ScopeError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read-only season views: awards, leaderboard and per-player stats.
#[derive(Debug, Clone)]
pub struct SeasonStatsService {
    pool: PgPool,
}

impl SeasonStatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn season_awards(&self, scope: SeasonScope) -> Result<SeasonAwards, StatsError> {
        ScopeValidator::new().validate_season_scope(&scope)?;

        let (picks, weekly_results, profiles, games) = tokio::try_join!(
            pick_queries::fetch_season_picks(&self.pool, &scope),
            weekly_result_queries::fetch_season_results(&self.pool, &scope),
            profile_queries::fetch_league_profiles(&self.pool, scope.league_id),
            game_queries::fetch_season_games(&self.pool, scope.season),
        )?;

        let data = SeasonData::new(&picks, &games, &weekly_results, &profiles);
        let awards = awards::calculate_awards(&data);
        tracing::info!(
            "🏆 Calculated {} of {} awards for {}",
            awards.values().filter(|award| award.is_some()).count(),
            awards.len(),
            scope
        );
        Ok(awards)
    }

    pub async fn leaderboard(&self, scope: SeasonScope) -> Result<Vec<LeaderboardEntry>, StatsError> {
        ScopeValidator::new().validate_season_scope(&scope)?;

        let (results, profiles) = tokio::try_join!(
            weekly_result_queries::fetch_season_results(&self.pool, &scope),
            profile_queries::fetch_league_profiles(&self.pool, scope.league_id),
        )?;
        Ok(leaderboard::leaderboard(&results, &profiles))
    }

    pub async fn user_summary(&self, user_id: Uuid, scope: SeasonScope) -> Result<UserSummary, StatsError> {
        let validator = ScopeValidator::new();
        validator.validate_season_scope(&scope)?;
        validator.validate_player(user_id)?;

        let results = weekly_result_queries::fetch_season_results(&self.pool, &scope).await?;
        Ok(leaderboard::user_summary(user_id, &results))
    }

    pub async fn my_stats(&self, user_id: Uuid, scope: SeasonScope) -> Result<MyStats, StatsError> {
        let validator = ScopeValidator::new();
        validator.validate_season_scope(&scope)?;
        validator.validate_player(user_id)?;

        let (picks, games) = tokio::try_join!(
            pick_queries::fetch_season_picks(&self.pool, &scope),
            game_queries::fetch_season_games(&self.pool, scope.season),
        )?;
        Ok(player_stats::my_stats(user_id, &picks, &games))
    }
}
