//! Season award calculators.
//!
//! Each calculator looks at the whole season of one league and returns at most
//! one winner. Ties are broken by username, then user id, so the same data
//! always produces the same award.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::league::settlement::score_distance;
use crate::models::game::Game;
use crate::models::pick::Pick;
use crate::models::profile::Profile;
use crate::models::stats::{Award, AwardValue, SeasonAwards};
use crate::models::weekly_result::WeeklyResult;

/// Minimum picks (exclusive) before a player can win "consistent".
pub const CONSISTENT_MIN_PICKS: u32 = 5;
/// Settled weeks required before "price is right" is awarded.
pub const PRICE_IS_RIGHT_MIN_WEEKS: usize = 4;

/// Season input shared by every calculator.
#[derive(Debug, Clone, Copy)]
pub struct SeasonData<'a> {
    pub picks: &'a [Pick],
    pub games: &'a [Game],
    pub weekly_results: &'a [WeeklyResult],
    pub profiles: &'a [Profile],
}

impl<'a> SeasonData<'a> {
    pub fn new(
        picks: &'a [Pick],
        games: &'a [Game],
        weekly_results: &'a [WeeklyResult],
        profiles: &'a [Profile],
    ) -> Self {
        Self { picks, games, weekly_results, profiles }
    }

    fn games_by_id(&self) -> HashMap<Uuid, &'a Game> {
        self.games.iter().map(|g| (g.id, g)).collect()
    }

    fn correct_picks(&self) -> impl Iterator<Item = &'a Pick> {
        self.picks.iter().filter(|p| p.is_graded_correct())
    }

    pub fn settled_weeks(&self) -> usize {
        self.weekly_results.iter().map(|r| r.week).collect::<BTreeSet<_>>().len()
    }
}

pub trait AwardCalculator: Send + Sync {
    /// Key used in the published stats payload.
    fn key(&self) -> &'static str;

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Highest,
    Lowest,
}

struct Usernames<'a>(HashMap<Uuid, &'a str>);

impl<'a> Usernames<'a> {
    fn new(profiles: &'a [Profile]) -> Self {
        Self(profiles.iter().map(|p| (p.id, p.username.as_str())).collect())
    }

    fn get(&self, user_id: &Uuid) -> String {
        self.0
            .get(user_id)
            .map(|name| name.to_string())
            .unwrap_or_else(|| user_id.to_string())
    }
}

/// Pick the leading player out of `scores`.
fn leader<T>(scores: &HashMap<Uuid, T>, names: &Usernames<'_>, direction: Direction) -> Option<(Uuid, T)>
where
    T: PartialOrd + Copy,
{
    scores
        .iter()
        .map(|(user_id, score)| (*user_id, *score, names.get(user_id)))
        .min_by(|a, b| {
            let by_score = match direction {
                Direction::Highest => b.1.partial_cmp(&a.1),
                Direction::Lowest => a.1.partial_cmp(&b.1),
            }
            .unwrap_or(Ordering::Equal);
            by_score.then_with(|| a.2.cmp(&b.2)).then_with(|| a.0.cmp(&b.0))
        })
        .map(|(user_id, score, _)| (user_id, score))
}

fn count_by_user<'p>(picks: impl Iterator<Item = &'p Pick>) -> HashMap<Uuid, u32> {
    let mut counts = HashMap::new();
    for pick in picks {
        *counts.entry(pick.user_id).or_insert(0) += 1;
    }
    counts
}

fn top_count(counts: &HashMap<Uuid, u32>, profiles: &[Profile]) -> Option<Award> {
    let names = Usernames::new(profiles);
    leader(counts, &names, Direction::Highest).map(|(user_id, count)| Award {
        user_id,
        username: names.get(&user_id),
        value: AwardValue::Count(count),
        game_id: None,
    })
}

/// Most correct picks.
pub struct Oracle;

impl AwardCalculator for Oracle {
    fn key(&self) -> &'static str {
        "oracle"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        top_count(&count_by_user(data.correct_picks()), data.profiles)
    }
}

/// Most poopstar weeks.
pub struct PooperStar;

impl AwardCalculator for PooperStar {
    fn key(&self) -> &'static str {
        "pooper_star"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let mut counts = HashMap::new();
        for result in data.weekly_results.iter().filter(|r| r.is_poopstar) {
            *counts.entry(result.user_id).or_insert(0u32) += 1;
        }
        top_count(&counts, data.profiles)
    }
}

/// Most perfect weeks.
pub struct Perfectionist;

impl AwardCalculator for Perfectionist {
    fn key(&self) -> &'static str {
        "perfectionist"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let mut counts = HashMap::new();
        for result in data.weekly_results.iter().filter(|r| r.is_perfect) {
            *counts.entry(result.user_id).or_insert(0u32) += 1;
        }
        top_count(&counts, data.profiles)
    }
}

/// Most picks of the player's own favorite team, right or wrong.
pub struct Homer;

impl AwardCalculator for Homer {
    fn key(&self) -> &'static str {
        "homer"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let favorites: HashMap<Uuid, &str> = data
            .profiles
            .iter()
            .filter_map(|p| p.favorite_team.as_deref().map(|team| (p.id, team)))
            .collect();
        let homer_picks = data
            .picks
            .iter()
            .filter(|p| favorites.get(&p.user_id) == Some(&p.selected_team.as_str()));
        top_count(&count_by_user(homer_picks), data.profiles)
    }
}

/// Best accuracy, as a percentage, among players with enough picks.
pub struct Consistent;

impl AwardCalculator for Consistent {
    fn key(&self) -> &'static str {
        "consistent"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let mut totals: HashMap<Uuid, (u32, u32)> = HashMap::new();
        for pick in data.picks {
            let entry = totals.entry(pick.user_id).or_insert((0, 0));
            entry.1 += 1;
            if pick.is_graded_correct() {
                entry.0 += 1;
            }
        }

        let percentages: HashMap<Uuid, f64> = totals
            .into_iter()
            .filter(|(_, (_, total))| *total > CONSISTENT_MIN_PICKS)
            .map(|(user_id, (correct, total))| (user_id, correct as f64 / total as f64 * 100.0))
            .collect();

        let names = Usernames::new(data.profiles);
        leader(&percentages, &names, Direction::Highest).map(|(user_id, pct)| Award {
            user_id,
            username: names.get(&user_id),
            value: AwardValue::Score(pct),
            game_id: None,
        })
    }
}

/// Most correct picks of the away side.
pub struct RoadWarrior;

impl AwardCalculator for RoadWarrior {
    fn key(&self) -> &'static str {
        "road_warrior"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let games = data.games_by_id();
        let road_wins = data.correct_picks().filter(|p| {
            games.get(&p.game_id).is_some_and(|g| g.is_away_team(&p.selected_team))
        });
        top_count(&count_by_user(road_wins), data.profiles)
    }
}

/// Most correct picks of the home side.
pub struct FrontRunner;

impl AwardCalculator for FrontRunner {
    fn key(&self) -> &'static str {
        "front_runner"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let games = data.games_by_id();
        let home_wins = data.correct_picks().filter(|p| {
            games.get(&p.game_id).is_some_and(|g| g.is_home_team(&p.selected_team))
        });
        top_count(&count_by_user(home_wins), data.profiles)
    }
}

/// Most correct picks in rivalry games.
pub struct RivalryKing;

impl AwardCalculator for RivalryKing {
    fn key(&self) -> &'static str {
        "rivalry_king"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let rivalry_games: BTreeSet<Uuid> = data
            .games
            .iter()
            .filter(|g| g.is_rivalry_game)
            .map(|g| g.id)
            .collect();
        let rivalry_wins = data.correct_picks().filter(|p| rivalry_games.contains(&p.game_id));
        top_count(&count_by_user(rivalry_wins), data.profiles)
    }
}

/// Lowest average tiebreaker distance. Only awarded once enough weeks are settled.
pub struct PriceIsRight;

impl AwardCalculator for PriceIsRight {
    fn key(&self) -> &'static str {
        "price_is_right"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        if data.settled_weeks() < PRICE_IS_RIGHT_MIN_WEEKS {
            return None;
        }

        let games = data.games_by_id();
        let mut diffs: HashMap<Uuid, (u64, u32)> = HashMap::new();
        for pick in data.picks {
            let Some(predicted) = pick.tiebreaker_prediction() else {
                continue;
            };
            let Some(actual) = games.get(&pick.game_id).and_then(|g| g.final_scores()) else {
                continue;
            };
            let entry = diffs.entry(pick.user_id).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(score_distance(predicted, actual));
            entry.1 += 1;
        }

        let averages: HashMap<Uuid, f64> = diffs
            .into_iter()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(user_id, (total, count))| (user_id, total as f64 / count as f64))
            .collect();

        let names = Usernames::new(data.profiles);
        leader(&averages, &names, Direction::Lowest).map(|(user_id, avg)| Award {
            user_id,
            username: names.get(&user_id),
            value: AwardValue::Score((avg * 100.0).round() / 100.0),
            game_id: None,
        })
    }
}

/// The single correct pick on the most lopsided game.
pub struct BiggestBlowout;

impl AwardCalculator for BiggestBlowout {
    fn key(&self) -> &'static str {
        "biggest_blowout"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let games = data.games_by_id();
        let names = Usernames::new(data.profiles);

        data.correct_picks()
            .filter_map(|p| {
                let margin = games.get(&p.game_id)?.margin()?;
                Some((margin, names.get(&p.user_id), p.user_id, p.game_id))
            })
            .min_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)).then_with(|| a.2.cmp(&b.2)).then_with(|| a.3.cmp(&b.3)))
            .map(|(margin, username, user_id, game_id)| Award {
                user_id,
                username,
                value: AwardValue::Count(margin),
                game_id: Some(game_id),
            })
    }
}

/// Rewards correct picks that went against the crowd.
pub struct Contrarian;

impl AwardCalculator for Contrarian {
    fn key(&self) -> &'static str {
        "contrarian"
    }

    fn calculate(&self, data: &SeasonData<'_>) -> Option<Award> {
        let mut per_team: HashMap<(Uuid, &str), u32> = HashMap::new();
        let mut per_game: HashMap<Uuid, u32> = HashMap::new();
        for pick in data.picks {
            *per_team.entry((pick.game_id, pick.selected_team.as_str())).or_insert(0) += 1;
            *per_game.entry(pick.game_id).or_insert(0) += 1;
        }

        let mut scores: HashMap<Uuid, f64> = HashMap::new();
        for pick in data.correct_picks() {
            let for_team = per_team
                .get(&(pick.game_id, pick.selected_team.as_str()))
                .copied()
                .unwrap_or(1);
            let total = per_game.get(&pick.game_id).copied().unwrap_or(1);
            let popularity = for_team as f64 / total as f64;
            *scores.entry(pick.user_id).or_insert(0.0) += 1.0 - popularity;
        }

        let names = Usernames::new(data.profiles);
        leader(&scores, &names, Direction::Highest).map(|(user_id, score)| Award {
            user_id,
            username: names.get(&user_id),
            value: AwardValue::Score(score),
            game_id: None,
        })
    }
}

pub fn all_calculators() -> Vec<Box<dyn AwardCalculator>> {
    vec![
        Box::new(Oracle),
        Box::new(PooperStar),
        Box::new(Perfectionist),
        Box::new(Homer),
        Box::new(Consistent),
        Box::new(RoadWarrior),
        Box::new(FrontRunner),
        Box::new(RivalryKing),
        Box::new(BiggestBlowout),
        Box::new(Contrarian),
        Box::new(PriceIsRight),
    ]
}

/// Run every calculator. Awards nobody qualified for map to `None`.
pub fn calculate_awards(data: &SeasonData<'_>) -> SeasonAwards {
    all_calculators()
        .iter()
        .map(|calculator| (calculator.key(), calculator.calculate(data)))
        .collect()
}
