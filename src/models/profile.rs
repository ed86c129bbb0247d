use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub favorite_team: Option<String>,
}
