//! Weekly settlement: turns graded picks into winners, poopstars and perfect weeks.
//!
//! Everything here is pure. The service layer fetches the scope's games and picks,
//! calls [`settle_week`], and persists the grades and results in one transaction.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use uuid::Uuid;

use crate::game::grading;
use crate::league::validation::{ScopeError, ScopeValidator};
use crate::models::game::Game;
use crate::models::pick::{Pick, PickGrade};
use crate::models::scope::{SeasonScope, WeekScope};
use crate::models::weekly_result::WeeklyResult;

/// Distance between a tiebreaker prediction and the actual final score.
///
/// Variant order matters: every `Exact` sorts below `NoPrediction`, which acts
/// as positive infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakerDiff {
    Exact(u64),
    NoPrediction,
}

/// |Δhome| + |Δaway|. Widened so any pair of `i32` scores fits.
pub fn score_distance(predicted: (i32, i32), actual: (i32, i32)) -> u64 {
    u64::from(predicted.0.abs_diff(actual.0)) + u64::from(predicted.1.abs_diff(actual.1))
}

impl TiebreakerDiff {
    pub fn between(predicted: (i32, i32), actual: (i32, i32)) -> Self {
        TiebreakerDiff::Exact(score_distance(predicted, actual))
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, TiebreakerDiff::Exact(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerTally {
    pub user_id: Uuid,
    pub correct_count: u32,
    pub picks_made: u32,
    pub tiebreaker_diff: TiebreakerDiff,
}

/// Everything one settlement pass produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSettlement {
    pub scope: WeekScope,
    pub total_games: usize,
    pub decided_games: usize,
    pub tiebreaker_game_id: Option<Uuid>,
    pub tallies: Vec<PlayerTally>,
    pub grades: Vec<PickGrade>,
    pub results: Vec<WeeklyResult>,
}

impl WeekSettlement {
    pub fn winners(&self) -> impl Iterator<Item = &WeeklyResult> {
        self.results.iter().filter(|r| r.is_winner)
    }

    pub fn poopstars(&self) -> impl Iterator<Item = &WeeklyResult> {
        self.results.iter().filter(|r| r.is_poopstar)
    }

    pub fn has_perfect_week(&self) -> bool {
        self.results.iter().any(|r| r.is_perfect)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SettlementOutcome {
    Settled(WeekSettlement),
    /// Valid but empty week: nobody picked anything.
    NothingToGrade { scope: WeekScope },
}

#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error("Invalid settlement scope: {0}")]
    Validation(#[from] ScopeError),
    #[error("No game in {scope} has a declared winner")]
    NotSettleable { scope: WeekScope },
    #[error("Failed to persist settlement for {scope}: {source}")]
    Persistence {
        scope: WeekScope,
        #[source]
        source: sqlx::Error,
    },
    #[error("Failed to look up unsettled weeks for {scope}: {source}")]
    Lookup {
        scope: SeasonScope,
        #[source]
        source: sqlx::Error,
    },
}

/// The week's tiebreaker game: the last one on the schedule.
pub fn tiebreaker_game(games: &[Game]) -> Option<&Game> {
    games
        .iter()
        .max_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time).then(a.id.cmp(&b.id)))
}

/// Settle one week of one league.
///
/// `games` and `picks` may contain records outside `scope`; they are ignored.
pub fn settle_week(
    scope: &WeekScope,
    games: &[Game],
    picks: &[Pick],
) -> Result<SettlementOutcome, SettlementError> {
    ScopeValidator::new().validate_week_scope(scope)?;

    let games: Vec<Game> = games
        .iter()
        .filter(|g| g.season == scope.season && g.week == scope.week)
        .cloned()
        .collect();
    let total_games = games.len();
    let decided_games = games.iter().filter(|g| g.is_decided()).count();
    if decided_games == 0 {
        return Err(SettlementError::NotSettleable { scope: *scope });
    }

    let picks: Vec<Pick> = picks
        .iter()
        .filter(|p| {
            p.league_id == scope.league_id && p.season == scope.season && p.week == scope.week
        })
        .cloned()
        .collect();
    if picks.is_empty() {
        tracing::info!("📭 [SETTLEMENT] Nothing to grade for {}", scope);
        return Ok(SettlementOutcome::NothingToGrade { scope: *scope });
    }

    let grades = grading::grade_decided(&games, &picks);
    let tiebreaker = tiebreaker_game(&games);
    let tallies = tally_players(&picks, &grades, tiebreaker);

    let winners = determine_winners(&tallies);
    let perfect: BTreeSet<Uuid> = tallies
        .iter()
        .filter(|t| total_games > 0 && t.correct_count as usize == total_games)
        .map(|t| t.user_id)
        .collect();
    let winners: BTreeSet<Uuid> = winners.union(&perfect).copied().collect();
    let poopstars = determine_poopstars(&tallies, &perfect);

    let results = tallies
        .iter()
        .map(|tally| {
            let is_winner = winners.contains(&tally.user_id);
            WeeklyResult {
                user_id: tally.user_id,
                league_id: scope.league_id,
                season: scope.season,
                week: scope.week,
                is_winner,
                is_poopstar: poopstars.contains(&tally.user_id),
                is_perfect: perfect.contains(&tally.user_id),
                has_paid: is_winner,
            }
        })
        .collect();

    tracing::info!(
        "🏁 [SETTLEMENT] {}: {} players, {}/{} games decided, {} winner(s), {} poopstar(s), {} perfect",
        scope,
        tallies.len(),
        decided_games,
        total_games,
        winners.len(),
        poopstars.len(),
        perfect.len()
    );

    Ok(SettlementOutcome::Settled(WeekSettlement {
        scope: *scope,
        total_games,
        decided_games,
        tiebreaker_game_id: tiebreaker.map(|g| g.id),
        tallies,
        grades,
        results,
    }))
}

/// Per-player correct counts and tiebreaker distance, ordered by user id.
pub fn tally_players(picks: &[Pick], grades: &[PickGrade], tiebreaker: Option<&Game>) -> Vec<PlayerTally> {
    let correct: HashMap<Uuid, bool> = grades.iter().map(|g| (g.pick_id, g.is_correct)).collect();
    let actual = tiebreaker.and_then(|g| g.final_scores().map(|scores| (g.id, scores)));

    let mut tallies: BTreeMap<Uuid, PlayerTally> = BTreeMap::new();
    for pick in picks {
        let tally = tallies.entry(pick.user_id).or_insert_with(|| PlayerTally {
            user_id: pick.user_id,
            correct_count: 0,
            picks_made: 0,
            tiebreaker_diff: TiebreakerDiff::NoPrediction,
        });
        tally.picks_made += 1;
        if correct.get(&pick.id).copied().unwrap_or(false) {
            tally.correct_count += 1;
        }
        if let (Some((game_id, scores)), Some(predicted)) = (actual, pick.tiebreaker_prediction()) {
            if pick.game_id == game_id {
                tally.tiebreaker_diff = TiebreakerDiff::between(predicted, scores);
            }
        }
    }

    tallies.into_values().collect()
}

/// Highest correct count wins; ties go to the smallest tiebreaker distance,
/// and anyone still tied shares the week.
pub fn determine_winners(tallies: &[PlayerTally]) -> BTreeSet<Uuid> {
    let Some(max_score) = tallies.iter().map(|t| t.correct_count).max() else {
        return BTreeSet::new();
    };
    let candidates: Vec<&PlayerTally> = tallies.iter().filter(|t| t.correct_count == max_score).collect();
    if candidates.len() == 1 {
        return candidates.iter().map(|t| t.user_id).collect();
    }

    let best = candidates.iter().map(|t| t.tiebreaker_diff).min();
    candidates
        .iter()
        .filter(|t| Some(t.tiebreaker_diff) == best)
        .map(|t| t.user_id)
        .collect()
}

/// Lowest correct count takes the poopstar; ties go to the worst finite
/// tiebreaker distance. If no tied player made a prediction they all share it.
///
/// Perfect players never count. Anyone else may end up both winner and
/// poopstar when the whole field ties.
pub fn determine_poopstars(tallies: &[PlayerTally], perfect: &BTreeSet<Uuid>) -> BTreeSet<Uuid> {
    let eligible: Vec<&PlayerTally> = tallies.iter().filter(|t| !perfect.contains(&t.user_id)).collect();
    let Some(min_score) = eligible.iter().map(|t| t.correct_count).min() else {
        return BTreeSet::new();
    };
    let candidates: Vec<&PlayerTally> = eligible.into_iter().filter(|t| t.correct_count == min_score).collect();
    if candidates.len() == 1 {
        return candidates.iter().map(|t| t.user_id).collect();
    }

    let worst = candidates
        .iter()
        .map(|t| t.tiebreaker_diff)
        .filter(TiebreakerDiff::is_finite)
        .max();
    match worst {
        Some(worst) => candidates
            .iter()
            .filter(|t| t.tiebreaker_diff == worst)
            .map(|t| t.user_id)
            .collect(),
        None => candidates.iter().map(|t| t.user_id).collect(),
    }
}
