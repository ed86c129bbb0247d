use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use pickem_backend::models::game::Game;
use pickem_backend::models::pick::Pick;
use pickem_backend::models::profile::Profile;
use pickem_backend::models::scope::WeekScope;
use pickem_backend::models::weekly_result::WeeklyResult;

pub const SEASON: i32 = 2024;

pub fn kickoff(slot: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 7, 12, 0, 0).unwrap() + Duration::hours(slot)
}

/// A decided game. `home_score`/`away_score` decide the winner.
pub fn final_game(week: i32, slot: i64, home: &str, away: &str, home_score: i32, away_score: i32) -> Game {
    let winner = if home_score > away_score { home } else { away };
    Game {
        id: Uuid::new_v4(),
        season: SEASON,
        week,
        home_team: home.to_string(),
        away_team: away.to_string(),
        scheduled_time: kickoff(slot),
        home_score: Some(home_score),
        away_score: Some(away_score),
        winning_team: Some(winner.to_string()),
        is_rivalry_game: false,
    }
}

pub fn pending_game(week: i32, slot: i64, home: &str, away: &str) -> Game {
    Game {
        id: Uuid::new_v4(),
        season: SEASON,
        week,
        home_team: home.to_string(),
        away_team: away.to_string(),
        scheduled_time: kickoff(slot),
        home_score: None,
        away_score: None,
        winning_team: None,
        is_rivalry_game: false,
    }
}

pub fn pick(user_id: Uuid, league_id: Uuid, game: &Game, team: &str) -> Pick {
    Pick {
        id: Uuid::new_v4(),
        user_id,
        league_id,
        season: game.season,
        week: game.week,
        game_id: game.id,
        selected_team: team.to_string(),
        predicted_home_score: None,
        predicted_away_score: None,
        is_correct: None,
    }
}

/// Pick with a tiebreaker score prediction.
pub fn tiebreaker_pick(user_id: Uuid, league_id: Uuid, game: &Game, team: &str, home: i32, away: i32) -> Pick {
    Pick {
        predicted_home_score: Some(home),
        predicted_away_score: Some(away),
        ..pick(user_id, league_id, game, team)
    }
}

/// Picks for `games` where the first `correct` are right and the rest wrong.
pub fn picks_with_correct(user_id: Uuid, league_id: Uuid, games: &[Game], correct: usize) -> Vec<Pick> {
    games
        .iter()
        .enumerate()
        .map(|(i, game)| {
            let winner = game.winning_team.clone().unwrap_or_else(|| game.home_team.clone());
            let team = if i < correct {
                winner
            } else if winner == game.home_team {
                game.away_team.clone()
            } else {
                game.home_team.clone()
            };
            pick(user_id, league_id, game, &team)
        })
        .collect()
}

/// Mark a pick as already graded.
pub fn graded(mut pick: Pick, is_correct: bool) -> Pick {
    pick.is_correct = Some(is_correct);
    pick
}

pub fn result(scope: WeekScope, user_id: Uuid, is_winner: bool) -> WeeklyResult {
    WeeklyResult {
        user_id,
        league_id: scope.league_id,
        season: scope.season,
        week: scope.week,
        is_winner,
        is_poopstar: false,
        is_perfect: false,
        has_paid: is_winner,
    }
}

pub fn profile(username: &str) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        username: username.to_string(),
        favorite_team: None,
    }
}

/// A week's worth of decided games, one per slot.
pub fn decided_week(week: i32, count: usize) -> Vec<Game> {
    (0..count)
        .map(|i| {
            let home = format!("Home{}", i);
            let away = format!("Away{}", i);
            final_game(week, i as i64, &home, &away, 24 + i as i32, 17)
        })
        .collect()
}
