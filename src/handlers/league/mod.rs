pub mod financials_handler;
pub mod stats_handler;
