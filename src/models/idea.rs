use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use super::dates::format_date;

pub const DEFAULT_IDEA_NAME: &str = "Untitled";
pub const MAX_IDEA_NAME_LEN: usize = 140;

/// Completion stage of an idea, derived from its flag and post count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    NotStarted,
    InProgress,
    Done,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::NotStarted, Stage::InProgress, Stage::Done];

    pub fn of(complete: bool, post_count: i64) -> Self {
        match (complete, post_count) {
            (true, _) => Stage::Done,
            (false, 0) => Stage::NotStarted,
            (false, _) => Stage::InProgress,
        }
    }

    /// Value used in query strings.
    pub fn as_param(&self) -> &'static str {
        match self {
            Stage::NotStarted => "1",
            Stage::InProgress => "2",
            Stage::Done => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::NotStarted => "not started",
            Stage::InProgress => "in progress",
            Stage::Done => "done",
        }
    }
}

impl FromStr for Stage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Stage::NotStarted),
            "2" => Ok(Stage::InProgress),
            "3" => Ok(Stage::Done),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Idea {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub number: i64,
    pub complete: bool,
    pub created_at: String,
}

impl Idea {
    pub fn new(user_id: String, number: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name: DEFAULT_IDEA_NAME.to_string(),
            number,
            complete: false,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// One row of the dashboard, also the JSON shape of `/api/ideas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaSummary {
    pub id: String,
    pub name: String,
    pub number: i64,
    pub complete: bool,
    pub created_time: String,
}

impl From<Idea> for IdeaSummary {
    fn from(idea: Idea) -> Self {
        Self {
            created_time: format_date(&idea.created_at),
            id: idea.id,
            name: idea.name,
            number: idea.number,
            complete: idea.complete,
        }
    }
}
