pub mod ledger_service;
pub mod score_correction_service;
pub mod season_stats_service;
pub mod settlement_service;

pub use ledger_service::LedgerService;
pub use score_correction_service::ScoreCorrectionService;
pub use season_stats_service::SeasonStatsService;
pub use settlement_service::SettlementService;
