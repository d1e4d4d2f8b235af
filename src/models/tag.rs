use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::truncate_chars;

pub const MAX_TAG_LEN: usize = 25;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: String,
    pub user_id: String,
    pub name: String,
}

impl Tag {
    /// Names are stored as given, cut to 25 characters. No case folding.
    pub fn new(user_id: String, name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name: truncate_chars(name, MAX_TAG_LEN),
        }
    }
}

/// A tag together with the number of ideas it is linked to.
#[derive(Debug, Clone, FromRow)]
pub struct TagWithCount {
    pub id: String,
    pub name: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_are_cut_to_limit() {
        let tag = Tag::new("u".to_string(), "a_very_long_tag_name_exceeding_limit");
        assert_eq!(tag.name, "a_very_long_tag_name_exce");
        assert_eq!(tag.name.chars().count(), MAX_TAG_LEN);
    }

    #[test]
    fn names_keep_their_case() {
        let tag = Tag::new("u".to_string(), "Work");
        assert_eq!(tag.name, "Work");
    }
}
