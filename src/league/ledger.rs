//! Pot arithmetic over settled weeks.
//!
//! Losers each pay the week's pot share; winners split the losers' total evenly.
//! Shares are kept at full decimal precision and only rounded to cents when a
//! summary is produced.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::settings::PotSettings;
use crate::models::stats::{LedgerWeek, PlayerFinancials, WeekOutcome};
use crate::models::weekly_result::WeeklyResult;

/// Money movement for one settled week of one league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekPayout {
    pub week: i32,
    pub perfect_week: bool,
    pub pot_per_loser: Decimal,
    pub winners: Vec<Uuid>,
    pub losers: Vec<Uuid>,
    /// Zero when the week has no winner.
    pub winnings_per_winner: Decimal,
}

impl WeekPayout {
    /// Total paid in by losers.
    pub fn pot(&self) -> Decimal {
        self.pot_per_loser * Decimal::from(self.losers.len() as u64)
    }

    /// Total paid out to winners.
    pub fn paid_out(&self) -> Decimal {
        self.winnings_per_winner * Decimal::from(self.winners.len() as u64)
    }

    pub fn amount_for(&self, user_id: Uuid) -> Option<(WeekOutcome, Decimal)> {
        if self.winners.contains(&user_id) {
            Some((WeekOutcome::Won, self.winnings_per_winner))
        } else if self.losers.contains(&user_id) {
            Some((WeekOutcome::Lost, self.pot_per_loser))
        } else {
            None
        }
    }
}

/// Compute the payout for one week from that week's results.
pub fn week_payout(week: i32, results: &[&WeeklyResult], settings: &PotSettings) -> WeekPayout {
    let perfect_week = results.iter().any(|r| r.is_perfect);
    let pot_per_loser = settings.pot_per_loser(perfect_week);

    let winners: Vec<Uuid> = results.iter().filter(|r| r.is_winner).map(|r| r.user_id).collect();
    let losers: Vec<Uuid> = results.iter().filter(|r| !r.is_winner).map(|r| r.user_id).collect();

    let winnings_per_winner = if winners.is_empty() {
        Decimal::ZERO
    } else {
        pot_per_loser * Decimal::from(losers.len() as u64) / Decimal::from(winners.len() as u64)
    };

    WeekPayout {
        week,
        perfect_week,
        pot_per_loser,
        winners,
        losers,
        winnings_per_winner,
    }
}

/// Payouts for every settled week in `results`, keyed by week.
///
/// `results` should cover a single league and season.
pub fn season_payouts(results: &[WeeklyResult], settings: &PotSettings) -> BTreeMap<i32, WeekPayout> {
    let mut by_week: BTreeMap<i32, Vec<&WeeklyResult>> = BTreeMap::new();
    for result in results {
        by_week.entry(result.week).or_default().push(result);
    }

    by_week
        .into_iter()
        .map(|(week, week_results)| (week, week_payout(week, &week_results, settings)))
        .collect()
}

/// Season totals for one player.
pub fn player_financials(user_id: Uuid, results: &[WeeklyResult], settings: &PotSettings) -> PlayerFinancials {
    let payouts = season_payouts(results, settings);
    financials_from_payouts(user_id, results, &payouts)
}

/// Season totals for every player who appears in `results`, ordered by user id.
pub fn league_financials(results: &[WeeklyResult], settings: &PotSettings) -> Vec<PlayerFinancials> {
    let payouts = season_payouts(results, settings);
    let players: BTreeSet<Uuid> = results.iter().map(|r| r.user_id).collect();

    players
        .into_iter()
        .map(|user_id| financials_from_payouts(user_id, results, &payouts))
        .collect()
}

fn financials_from_payouts(
    user_id: Uuid,
    results: &[WeeklyResult],
    payouts: &BTreeMap<i32, WeekPayout>,
) -> PlayerFinancials {
    let mut player_weeks: Vec<&WeeklyResult> = results.iter().filter(|r| r.user_id == user_id).collect();
    player_weeks.sort_by_key(|r| r.week);

    let mut total_winnings = Decimal::ZERO;
    let mut total_losses = Decimal::ZERO;
    let mut outstanding = Decimal::ZERO;
    let mut weeks = Vec::with_capacity(player_weeks.len());

    for result in player_weeks {
        let Some(payout) = payouts.get(&result.week) else {
            continue;
        };
        let Some((outcome, amount)) = payout.amount_for(user_id) else {
            continue;
        };
        match outcome {
            WeekOutcome::Won => total_winnings += amount,
            WeekOutcome::Lost => {
                total_losses += amount;
                if !result.has_paid {
                    outstanding += amount;
                }
            }
        }
        weeks.push(LedgerWeek {
            week: result.week,
            outcome,
            amount: amount.round_dp(2),
            perfect_week: payout.perfect_week,
            has_paid: result.has_paid,
        });
    }

    PlayerFinancials {
        user_id,
        total_winnings: total_winnings.round_dp(2),
        total_losses: total_losses.round_dp(2),
        net: (total_winnings - total_losses).round_dp(2),
        outstanding: outstanding.round_dp(2),
        weeks,
    }
}
