use sqlx::PgPool;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{game_queries, pick_queries, weekly_result_queries};
use crate::league::settlement::{self, SettlementError, SettlementOutcome, WeekSettlement};
use crate::league::validation::ScopeValidator;
use crate::models::scope::{SeasonScope, WeekScope};

/// Runs settlement against the database: one read snapshot, one write transaction.
#[derive(Debug, Clone)]
pub struct SettlementService {
    pool: PgPool,
}

/// Result of asking for the most recent unsettled week.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LatestWeekOutcome {
    AllSettled { scope: SeasonScope },
    Week { week: i32, outcome: SettlementOutcome },
}

impl SettlementService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grade and settle one week of a league.
    ///
    /// Grades and results are committed together; on any failure nothing in the
    /// scope changes and the call can simply be retried.
    pub async fn settle_week(&self, scope: WeekScope) -> Result<SettlementOutcome, SettlementError> {
        ScopeValidator::new().validate_week_scope(&scope)?;
        tracing::info!("🎯 [SETTLEMENT] Settling {}", scope);

        let persistence = move |source| SettlementError::Persistence { scope, source };

        let (games, picks) = tokio::try_join!(
            game_queries::fetch_week_games(&self.pool, scope.season, scope.week),
            pick_queries::fetch_week_picks(&self.pool, &scope),
        )
        .map_err(persistence)?;
        tracing::debug!("🔍 [SETTLEMENT] Loaded {} games and {} picks for {}", games.len(), picks.len(), scope);

        let outcome = match settlement::settle_week(&scope, &games, &picks) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("⚠️  [SETTLEMENT] {} rejected: {}", scope, e);
                return Err(e);
            }
        };

        if let SettlementOutcome::Settled(settled) = &outcome {
            if let Err(e) = self.persist(settled).await {
                tracing::error!("❌ [SETTLEMENT] Failed to persist {}: {}", scope, e);
                return Err(persistence(e));
            }
            tracing::info!("✅ [SETTLEMENT] Persisted {} results for {}", settled.results.len(), scope);
        }

        Ok(outcome)
    }

    /// Settle the newest week that has a decided game but no results yet.
    pub async fn settle_latest_week(&self, scope: SeasonScope) -> Result<LatestWeekOutcome, SettlementError> {
        ScopeValidator::new().validate_season_scope(&scope)?;
        let (completed, settled) = tokio::try_join!(
            game_queries::fetch_completed_weeks(&self.pool, scope.season),
            weekly_result_queries::fetch_settled_weeks(&self.pool, &scope),
        )
        .map_err(|source| SettlementError::Lookup { scope, source })?;

        let Some(week) = completed.into_iter().filter(|week| !settled.contains(week)).max() else {
            tracing::info!("📭 [SETTLEMENT] All completed weeks of {} are already settled", scope);
            return Ok(LatestWeekOutcome::AllSettled { scope });
        };

        let outcome = self.settle_week(scope.week(week)).await?;
        Ok(LatestWeekOutcome::Week { week, outcome })
    }

    async fn persist(&self, settled: &WeekSettlement) -> Result<(), sqlx::Error> {
        let players: Vec<Uuid> = settled.results.iter().map(|r| r.user_id).collect();

        let mut tx = self.pool.begin().await?;
        let graded = pick_queries::apply_grades(&mut *tx, &settled.grades).await?;
        let removed = weekly_result_queries::delete_stale_results(&mut *tx, &settled.scope, &players).await?;
        weekly_result_queries::upsert_week_results(&mut *tx, &settled.scope, &settled.results).await?;
        tx.commit().await?;

        tracing::debug!("📝 [SETTLEMENT] {} picks graded, {} stale results removed", graded, removed);
        Ok(())
    }
}
