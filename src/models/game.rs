// src/models/game.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled game. Owned by the schedule import / live score collaborators;
/// read-only here except for commissioner score corrections.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Game {
    pub id: Uuid,
    pub season: i32,
    pub week: i32,
    pub home_team: String,
    pub away_team: String,
    pub scheduled_time: DateTime<Utc>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub winning_team: Option<String>,
    #[serde(default)]
    pub is_rivalry_game: bool,
}

impl Game {
    /// The declared winner, if the game has been finalized.
    pub fn winner(&self) -> Option<&str> {
        self.winning_team.as_deref()
    }

    pub fn is_decided(&self) -> bool {
        self.winning_team.is_some()
    }

    /// Both final scores, when present.
    pub fn final_scores(&self) -> Option<(i32, i32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    /// Absolute score margin of a finished game.
    pub fn margin(&self) -> Option<u32> {
        self.final_scores().map(|(home, away)| home.abs_diff(away))
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    pub fn is_home_team(&self, team: &str) -> bool {
        self.home_team == team
    }

    pub fn is_away_team(&self, team: &str) -> bool {
        self.away_team == team
    }

    /// Winner implied by a pair of scores. Equal scores have no winner.
    pub fn winner_for_scores(&self, home_score: i32, away_score: i32) -> Option<&str> {
        if home_score > away_score {
            Some(self.home_team.as_str())
        } else if away_score > home_score {
            Some(self.away_team.as_str())
        } else {
            None
        }
    }
}

/// Commissioner correction of a game's final score
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoreCorrectionRequest {
    pub home_score: i32,
    pub away_score: i32,
}
