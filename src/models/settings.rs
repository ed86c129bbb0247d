use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const WEEKLY_BUY_IN: &str = "weekly_buy_in";
pub const PERFECT_WEEK_MULTIPLIER: &str = "perfect_week_multiplier";

pub const DEFAULT_WEEKLY_BUY_IN: Decimal = Decimal::TEN;
pub const DEFAULT_PERFECT_WEEK_MULTIPLIER: Decimal = Decimal::TWO;

/// Pot policy read from the `settings` table.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PotSettings {
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_buy_in: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub perfect_week_multiplier: Decimal,
}

impl Default for PotSettings {
    fn default() -> Self {
        Self {
            weekly_buy_in: DEFAULT_WEEKLY_BUY_IN,
            perfect_week_multiplier: DEFAULT_PERFECT_WEEK_MULTIPLIER,
        }
    }
}

impl PotSettings {
    /// What each loser owes for a week.
    pub fn pot_per_loser(&self, perfect_week: bool) -> Decimal {
        if perfect_week {
            self.weekly_buy_in * self.perfect_week_multiplier
        } else {
            self.weekly_buy_in
        }
    }
}

/// Partial update of the pot policy. Absent fields are left untouched.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdatePotSettingsRequest {
    pub weekly_buy_in: Option<Decimal>,
    pub perfect_week_multiplier: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_week_multiplies_the_buy_in() {
        let settings = PotSettings::default();
        assert_eq!(settings.pot_per_loser(false), Decimal::from(10));
        assert_eq!(settings.pot_per_loser(true), Decimal::from(20));

        let custom = PotSettings {
            weekly_buy_in: Decimal::new(550, 2),
            perfect_week_multiplier: Decimal::from(3),
        };
        assert_eq!(custom.pot_per_loser(true), Decimal::new(1650, 2));
    }
}
