pub mod game_management_handler;
pub mod ledger_handler;
pub mod settlement_handler;
