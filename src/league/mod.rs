pub mod awards;
pub mod leaderboard;
pub mod ledger;
pub mod player_stats;
pub mod settlement;
pub mod validation;
