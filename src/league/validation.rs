use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::game::Game;
use crate::models::scope::{SeasonScope, WeekScope};
use crate::models::settings::UpdatePotSettingsRequest;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScopeError {
    #[error("league id is required")]
    MissingLeague,
    #[error("player id is required")]
    MissingPlayer,
    #[error("invalid season {0}")]
    InvalidSeason(i32),
    #[error("invalid week {0}")]
    InvalidWeek(i32),
    #[error("invalid score {0}: scores cannot be negative")]
    NegativeScore(i32),
    #[error("tied scores ({0}-{0}) are not supported")]
    TiedScore(i32),
    #[error("{team} is not playing in game {game_id}")]
    TeamNotInGame { team: String, game_id: Uuid },
    #[error("invalid pot setting: {0}")]
    InvalidPotSetting(String),
}

const MAX_WEEK: i32 = 25;

/// Centralized validation for settlement and ledger inputs
#[derive(Debug, Default)]
pub struct ScopeValidator;

impl ScopeValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_season_scope(&self, scope: &SeasonScope) -> Result<(), ScopeError> {
        if scope.league_id.is_nil() {
            return Err(ScopeError::MissingLeague);
        }
        if scope.season <= 0 {
            return Err(ScopeError::InvalidSeason(scope.season));
        }
        Ok(())
    }

    pub fn validate_week_scope(&self, scope: &WeekScope) -> Result<(), ScopeError> {
        self.validate_season_scope(&scope.season_scope())?;
        // Week 0 exists in college football schedules
        if !(0..=MAX_WEEK).contains(&scope.week) {
            return Err(ScopeError::InvalidWeek(scope.week));
        }
        Ok(())
    }

    pub fn validate_player(&self, user_id: Uuid) -> Result<(), ScopeError> {
        if user_id.is_nil() {
            return Err(ScopeError::MissingPlayer);
        }
        Ok(())
    }

    /// Final scores must be non-negative and must produce a winner.
    pub fn validate_final_score(&self, home_score: i32, away_score: i32) -> Result<(), ScopeError> {
        for score in [home_score, away_score] {
            if score < 0 {
                return Err(ScopeError::NegativeScore(score));
            }
        }
        if home_score == away_score {
            return Err(ScopeError::TiedScore(home_score));
        }
        Ok(())
    }

    pub fn validate_selected_team(&self, game: &Game, team: &str) -> Result<(), ScopeError> {
        if !game.has_team(team) {
            return Err(ScopeError::TeamNotInGame {
                team: team.to_string(),
                game_id: game.id,
            });
        }
        Ok(())
    }

    pub fn validate_pot_update(&self, request: &UpdatePotSettingsRequest) -> Result<(), ScopeError> {
        if let Some(buy_in) = request.weekly_buy_in {
            if buy_in < Decimal::ZERO {
                return Err(ScopeError::InvalidPotSetting(format!(
                    "weekly buy-in {} cannot be negative",
                    buy_in
                )));
            }
        }
        if let Some(multiplier) = request.perfect_week_multiplier {
            if multiplier < Decimal::ONE {
                return Err(ScopeError::InvalidPotSetting(format!(
                    "perfect week multiplier {} must be at least 1",
                    multiplier
                )));
            }
        }
        Ok(())
    }
}
