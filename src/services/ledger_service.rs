use sqlx::PgPool;
use uuid::Uuid;

use crate::db::settings_queries::{self, SettingsError};
use crate::db::weekly_result_queries;
use crate::league::ledger;
use crate::league::validation::{ScopeError, ScopeValidator};
use crate::models::scope::{SeasonScope, WeekScope};
use crate::models::settings::{PotSettings, UpdatePotSettingsRequest};
use crate::models::stats::PlayerFinancials;
use crate::models::weekly_result::WeeklyResult;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ScopeError),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Season money: winnings, losses, payments and the pot policy.
#[derive(Debug, Clone)]
pub struct LedgerService {
    pool: PgPool,
}

impl LedgerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn player_financials(&self, user_id: Uuid, scope: SeasonScope) -> Result<PlayerFinancials, LedgerError> {
        let validator = ScopeValidator::new();
        validator.validate_season_scope(&scope)?;
        validator.validate_player(user_id)?;

        let (results, settings) = self.load_season(&scope).await?;
        let financials = ledger::player_financials(user_id, &results, &settings);
        tracing::debug!(
            "💰 Financials for {} in {}: +{} / -{}",
            user_id, scope, financials.total_winnings, financials.total_losses
        );
        Ok(financials)
    }

    pub async fn league_financials(&self, scope: SeasonScope) -> Result<Vec<PlayerFinancials>, LedgerError> {
        ScopeValidator::new().validate_season_scope(&scope)?;
        let (results, settings) = self.load_season(&scope).await?;
        Ok(ledger::league_financials(&results, &settings))
    }

    /// Record (or undo) a player's payment for a settled week.
    pub async fn mark_paid(
        &self,
        user_id: Uuid,
        scope: WeekScope,
        has_paid: bool,
    ) -> Result<Option<WeeklyResult>, LedgerError> {
        let validator = ScopeValidator::new();
        validator.validate_week_scope(&scope)?;
        validator.validate_player(user_id)?;

        let updated = weekly_result_queries::set_paid(&self.pool, user_id, &scope, has_paid).await?;
        match &updated {
            Some(_) => tracing::info!("💵 {} marked has_paid={} for {}", user_id, has_paid, scope),
            None => tracing::warn!("No settled result for {} in {}", user_id, scope),
        }
        Ok(updated)
    }

    pub async fn pot_settings(&self) -> Result<PotSettings, LedgerError> {
        Ok(settings_queries::fetch_pot_settings(&self.pool).await?)
    }

    pub async fn update_pot_settings(&self, request: &UpdatePotSettingsRequest) -> Result<PotSettings, LedgerError> {
        ScopeValidator::new().validate_pot_update(request)?;

        let mut tx = self.pool.begin().await?;
        for (name, value) in settings_queries::changed_settings(request) {
            settings_queries::upsert_setting(&mut *tx, name, value).await?;
            tracing::info!("⚙️  Setting {} updated to {}", name, value);
        }
        let settings = settings_queries::fetch_pot_settings(&mut *tx).await?;
        tx.commit().await?;

        Ok(settings)
    }

    async fn load_season(&self, scope: &SeasonScope) -> Result<(Vec<WeeklyResult>, PotSettings), LedgerError> {
        let (results, settings) = tokio::join!(
            weekly_result_queries::fetch_season_results(&self.pool, scope),
            settings_queries::fetch_pot_settings(&self.pool),
        );
        Ok((results?, settings?))
    }
}
