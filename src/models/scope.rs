use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

/// One settlement pass: a single week of a season in a single league.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekScope {
    pub league_id: Uuid,
    pub season: i32,
    pub week: i32,
}

impl WeekScope {
    pub fn new(league_id: Uuid, season: i32, week: i32) -> Self {
        Self { league_id, season, week }
    }

    pub fn season_scope(&self) -> SeasonScope {
        SeasonScope::new(self.league_id, self.season)
    }
}

impl fmt::Display for WeekScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "league {} season {} week {}", self.league_id, self.season, self.week)
    }
}

/// All weeks of a season in a single league.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonScope {
    pub league_id: Uuid,
    pub season: i32,
}

impl SeasonScope {
    pub fn new(league_id: Uuid, season: i32) -> Self {
        Self { league_id, season }
    }

    pub fn week(&self, week: i32) -> WeekScope {
        WeekScope::new(self.league_id, self.season, week)
    }
}

impl fmt::Display for SeasonScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "league {} season {}", self.league_id, self.season)
    }
}
