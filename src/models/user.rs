use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Player,
    Commissioner,
}

impl UserRole {
    pub fn is_commissioner(&self) -> bool {
        matches!(self, UserRole::Commissioner)
    }
}
