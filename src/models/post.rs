use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::dates::format_datetime;
use super::truncate_chars;

pub const MAX_POST_LEN: usize = 3000;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: String,
    pub idea_id: String,
    pub user_id: String,
    pub body: String,
    pub created_at: String,
}

impl Post {
    pub fn new(idea_id: String, user_id: String, body: &str, created_at: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            idea_id,
            user_id,
            body: truncate_chars(body, MAX_POST_LEN),
            created_at,
        }
    }

    /// "DD.MM.YYYY HH:MM"
    pub fn created_time(&self) -> String {
        format_datetime(&self.created_at)
    }
}
