pub mod game_queries;
pub mod pick_queries;
pub mod profile_queries;
pub mod settings_queries;
pub mod weekly_result_queries;
