use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{game_queries, pick_queries};
use crate::game::grading::{self, GradingError};
use crate::league::validation::{ScopeError, ScopeValidator};
use crate::models::game::Game;
use crate::models::pick::Pick;

#[derive(Debug, thiserror::Error)]
pub enum ScoreCorrectionError {
    #[error("Invalid correction: {0}")]
    Validation(#[from] ScopeError),
    #[error("Game {0} not found")]
    GameNotFound(Uuid),
    #[error("Pick {0} not found")]
    PickNotFound(Uuid),
    #[error("Grading error: {0}")]
    Grading(#[from] GradingError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
pub struct ScoreCorrection {
    pub game: Game,
    pub picks_regraded: usize,
}

/// Commissioner corrections to final scores and individual picks.
#[derive(Debug, Clone)]
pub struct ScoreCorrectionService {
    pool: PgPool,
}

impl ScoreCorrectionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Overwrite a game's final score and re-grade every pick on it.
    ///
    /// Settled weeks are not touched; the commissioner re-runs settlement.
    pub async fn correct_game_score(
        &self,
        game_id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<ScoreCorrection, ScoreCorrectionError> {
        let validator = ScopeValidator::new();
        validator.validate_final_score(home_score, away_score)?;

        let mut tx = self.pool.begin().await?;
        let mut game = game_queries::fetch_game_for_update(&mut *tx, game_id)
            .await?
            .ok_or(ScoreCorrectionError::GameNotFound(game_id))?;

        let winning_team = game
            .winner_for_scores(home_score, away_score)
            .map(str::to_string)
            .ok_or(ScopeError::TiedScore(home_score))?;

        game_queries::update_final_score(&mut *tx, game_id, home_score, away_score, &winning_team).await?;
        game.home_score = Some(home_score);
        game.away_score = Some(away_score);
        game.winning_team = Some(winning_team);

        let picks = pick_queries::fetch_game_picks(&mut *tx, game_id).await?;
        let grades = grading::grade_game(&game, &picks)?;
        pick_queries::apply_grades(&mut *tx, &grades).await?;
        tx.commit().await?;

        tracing::info!(
            "🛠️  Corrected game {} to {} {} - {} {} ({} picks re-graded)",
            game_id, game.home_team, home_score, away_score, game.away_team, grades.len()
        );

        Ok(ScoreCorrection {
            game,
            picks_regraded: grades.len(),
        })
    }

    /// Change a pick's team. Decided games are re-graded on the spot.
    pub async fn edit_pick(&self, pick_id: Uuid, selected_team: &str) -> Result<Pick, ScoreCorrectionError> {
        let mut tx = self.pool.begin().await?;
        let pick = pick_queries::fetch_pick_for_update(&mut *tx, pick_id)
            .await?
            .ok_or(ScoreCorrectionError::PickNotFound(pick_id))?;
        let game = game_queries::fetch_game(&mut *tx, pick.game_id)
            .await?
            .ok_or(ScoreCorrectionError::GameNotFound(pick.game_id))?;

        ScopeValidator::new().validate_selected_team(&game, selected_team)?;

        let is_correct = game.winner().map(|winner| winner == selected_team);
        let updated = pick_queries::update_selection(&mut *tx, pick_id, selected_team, is_correct).await?;
        tx.commit().await?;

        tracing::info!("✏️  Pick {} changed from {} to {}", pick_id, pick.selected_team, selected_team);
        Ok(updated)
    }
}
