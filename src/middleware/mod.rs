pub mod auth;
pub mod commissioner;
