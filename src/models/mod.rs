pub mod common;
pub mod game;
pub mod pick;
pub mod profile;
pub mod scope;
pub mod settings;
pub mod stats;
pub mod user;
pub mod weekly_result;
