use std::collections::HashMap;

use uuid::Uuid;

use crate::models::game::Game;
use crate::models::pick::{Pick, PickGrade};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GradingError {
    #[error("Game {0} has no declared winner")]
    Undecided(Uuid),
}

/// Grade a single pick against a decided game.
pub fn grade_pick(game: &Game, pick: &Pick) -> Result<PickGrade, GradingError> {
    let winner = game.winner().ok_or(GradingError::Undecided(game.id))?;
    Ok(PickGrade {
        pick_id: pick.id,
        is_correct: pick.selected_team == winner,
    })
}

/// Grade every pick that references `game`. Picks for other games are skipped.
pub fn grade_game(game: &Game, picks: &[Pick]) -> Result<Vec<PickGrade>, GradingError> {
    if !game.is_decided() {
        return Err(GradingError::Undecided(game.id));
    }

    picks
        .iter()
        .filter(|pick| pick.game_id == game.id)
        .map(|pick| grade_pick(game, pick))
        .collect()
}

/// Grade a batch of picks against whichever of `games` are decided.
///
/// Picks whose game is undecided or unknown are left out of the result;
/// they stay ungraded.
pub fn grade_decided(games: &[Game], picks: &[Pick]) -> Vec<PickGrade> {
    let decided: HashMap<Uuid, &Game> = games
        .iter()
        .filter(|game| game.is_decided())
        .map(|game| (game.id, game))
        .collect();

    picks
        .iter()
        .filter_map(|pick| {
            let game = decided.get(&pick.game_id)?;
            grade_pick(game, pick).ok()
        })
        .collect()
}

/// Write grades back onto the in-memory picks.
pub fn apply_grades(picks: &mut [Pick], grades: &[PickGrade]) {
    let by_pick: HashMap<Uuid, bool> = grades.iter().map(|g| (g.pick_id, g.is_correct)).collect();
    for pick in picks.iter_mut() {
        if let Some(is_correct) = by_pick.get(&pick.id) {
            pick.is_correct = Some(*is_correct);
        }
    }
}
