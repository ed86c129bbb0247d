use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::models::profile::Profile;
use crate::models::stats::{LeaderboardEntry, UserSummary};
use crate::models::weekly_result::WeeklyResult;

/// Season standings by weeks won.
///
/// Players with the same number of wins share a rank ("1224" ranking) and are
/// listed alphabetically by username.
pub fn leaderboard(results: &[WeeklyResult], profiles: &[Profile]) -> Vec<LeaderboardEntry> {
    let mut records: BTreeMap<Uuid, (u32, u32)> = BTreeMap::new();
    for result in results {
        let record = records.entry(result.user_id).or_insert((0, 0));
        if result.is_winner {
            record.0 += 1;
        } else {
            record.1 += 1;
        }
    }

    let usernames: HashMap<Uuid, &str> = profiles.iter().map(|p| (p.id, p.username.as_str())).collect();
    let mut entries: Vec<LeaderboardEntry> = records
        .into_iter()
        .map(|(user_id, (wins, losses))| LeaderboardEntry {
            rank: 0,
            user_id,
            username: usernames
                .get(&user_id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| user_id.to_string()),
            wins,
            losses,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| a.username.cmp(&b.username))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    let mut previous_wins = None;
    let mut rank = 0;
    for (index, entry) in entries.iter_mut().enumerate() {
        if previous_wins != Some(entry.wins) {
            rank = index as u32 + 1;
            previous_wins = Some(entry.wins);
        }
        entry.rank = rank;
    }

    entries
}

/// Rank and win/loss record of one player. Rank is `None` until the player
/// has a settled week.
pub fn user_summary(user_id: Uuid, results: &[WeeklyResult]) -> UserSummary {
    let board = leaderboard(results, &[]);
    match board.iter().find(|entry| entry.user_id == user_id) {
        Some(entry) => UserSummary {
            rank: Some(entry.rank),
            weeks_won: entry.wins,
            weeks_lost: entry.losses,
        },
        None => UserSummary {
            rank: None,
            weeks_won: 0,
            weeks_lost: 0,
        },
    }
}
