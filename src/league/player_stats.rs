use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::models::game::Game;
use crate::models::pick::Pick;
use crate::models::stats::{MyStats, PickingTendencies, WeekPerformance};

/// Week-by-week correct picks and home/away leaning for one player.
pub fn my_stats(user_id: Uuid, picks: &[Pick], games: &[Game]) -> MyStats {
    let games: HashMap<Uuid, &Game> = games.iter().map(|g| (g.id, g)).collect();
    let player_picks = picks.iter().filter(|p| p.user_id == user_id);

    let mut per_week: BTreeMap<i32, u32> = BTreeMap::new();
    let mut tendencies = PickingTendencies::default();
    for pick in player_picks {
        if pick.is_graded_correct() {
            *per_week.entry(pick.week).or_insert(0) += 1;
        }
        match games.get(&pick.game_id) {
            Some(game) if game.is_home_team(&pick.selected_team) => tendencies.home_picks += 1,
            Some(game) if game.is_away_team(&pick.selected_team) => tendencies.away_picks += 1,
            _ => {}
        }
    }

    MyStats {
        performance_over_time: per_week
            .into_iter()
            .map(|(week, wins)| WeekPerformance { week, wins })
            .collect(),
        picking_tendencies: tendencies,
    }
}
