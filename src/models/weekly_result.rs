use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Settled outcome of one player's week in one league.
/// Keyed by `(user_id, league_id, season, week)`.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct WeeklyResult {
    pub user_id: Uuid,
    pub league_id: Uuid,
    pub season: i32,
    pub week: i32,
    pub is_winner: bool,
    pub is_poopstar: bool,
    pub is_perfect: bool,
    pub has_paid: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MarkPaidRequest {
    #[serde(default = "default_paid")]
    pub has_paid: bool,
}

fn default_paid() -> bool {
    true
}
