use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use uuid::Uuid;

/// Value attached to a season award.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum AwardValue {
    Count(u32),
    Score(f64),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Award {
    pub user_id: Uuid,
    pub username: String,
    pub value: AwardValue,
    /// Only set for awards that single out one game (biggest blowout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<Uuid>,
}

/// Award key -> winner. `None` means nobody qualified.
pub type SeasonAwards = BTreeMap<&'static str, Option<Award>>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub username: String,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub rank: Option<u32>,
    pub weeks_won: u32,
    pub weeks_lost: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WeekPerformance {
    pub week: i32,
    pub wins: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PickingTendencies {
    pub home_picks: u32,
    pub away_picks: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MyStats {
    pub performance_over_time: Vec<WeekPerformance>,
    pub picking_tendencies: PickingTendencies,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeekOutcome {
    Won,
    Lost,
}

/// One settled week from a single player's point of view.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LedgerWeek {
    pub week: i32,
    pub outcome: WeekOutcome,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub perfect_week: bool,
    pub has_paid: bool,
}

/// Season money summary for one player. Amounts are rounded to cents.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayerFinancials {
    pub user_id: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_winnings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_losses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    /// Losses from weeks not yet marked as paid.
    #[serde(with = "rust_decimal::serde::float")]
    pub outstanding: Decimal,
    pub weeks: Vec<LedgerWeek>,
}
