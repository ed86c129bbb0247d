use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A player's prediction for one game in one league.
///
/// `predicted_home_score`/`predicted_away_score` are only filled in on the
/// week's tiebreaker game. `is_correct` stays `None` until the game is graded.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Pick {
    pub id: Uuid,
    pub user_id: Uuid,
    pub league_id: Uuid,
    pub season: i32,
    pub week: i32,
    pub game_id: Uuid,
    pub selected_team: String,
    pub predicted_home_score: Option<i32>,
    pub predicted_away_score: Option<i32>,
    pub is_correct: Option<bool>,
}

impl Pick {
    pub fn is_graded_correct(&self) -> bool {
        self.is_correct == Some(true)
    }

    /// Both halves of a tiebreaker prediction, when present.
    pub fn tiebreaker_prediction(&self) -> Option<(i32, i32)> {
        match (self.predicted_home_score, self.predicted_away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}

/// The outcome of grading a single pick, ready to be persisted.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PickGrade {
    pub pick_id: Uuid,
    pub is_correct: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditPickRequest {
    pub selected_team: String,
}
