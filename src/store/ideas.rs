use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::dates::parse_post_time;
use crate::models::idea::{DEFAULT_IDEA_NAME, MAX_IDEA_NAME_LEN};
use crate::models::{truncate_chars, Idea, Post};
use crate::store::StoreError;

/// Everything a single save from the editor may change.
#[derive(Debug, Default)]
pub struct IdeaUpdate<'a> {
    pub name: &'a str,
    pub post_text: Option<&'a str>,
    pub post_time: Option<&'a str>,
    pub complete: Option<bool>,
}

#[derive(Debug)]
pub enum UpdateOutcome {
    /// The idea does not exist or is not the caller's.
    Ignored,
    Updated { post: Option<Post> },
}

/// Create an empty idea numbered from the owner's counter.
pub async fn create_idea(db: &SqlitePool, owner_id: &str) -> Result<Idea, sqlx::Error> {
    let mut tx = db.begin().await?;

    let (number,): (i64,) = sqlx::query_as(
        "UPDATE users SET idea_counter = idea_counter + 1 WHERE id = ? RETURNING idea_counter",
    )
    .bind(owner_id)
    .fetch_one(&mut *tx)
    .await?;

    let idea = Idea::new(owner_id.to_string(), number);
    sqlx::query(
        "INSERT INTO ideas (id, user_id, name, number, complete, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&idea.id)
    .bind(&idea.user_id)
    .bind(&idea.name)
    .bind(idea.number)
    .bind(idea.complete)
    .bind(&idea.created_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(idea)
}

pub async fn get_idea(db: &SqlitePool, idea_id: &str, caller_id: &str) -> Result<Option<Idea>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM ideas WHERE id = ? AND user_id = ?")
        .bind(idea_id)
        .bind(caller_id)
        .fetch_optional(db)
        .await
}

/// Rename, optionally append a post, optionally set completion. Either every
/// part is applied or none is; a malformed post time on the caller's own idea
/// fails before any write.
pub async fn update_idea(
    db: &SqlitePool,
    idea_id: &str,
    caller_id: &str,
    update: IdeaUpdate<'_>,
) -> Result<UpdateOutcome, StoreError> {
    let mut tx = db.begin().await?;

    let idea: Option<Idea> = sqlx::query_as("SELECT * FROM ideas WHERE id = ? AND user_id = ?")
        .bind(idea_id)
        .bind(caller_id)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(idea) = idea else {
        return Ok(UpdateOutcome::Ignored);
    };

    let post_text = update.post_text.filter(|text| !text.trim().is_empty());
    let post_time = match (post_text, update.post_time.filter(|t| !t.trim().is_empty())) {
        (Some(_), Some(raw)) => {
            Some(parse_post_time(raw).map_err(|_| StoreError::InvalidPostTime(raw.to_string()))?)
        }
        (Some(_), None) => Some(Utc::now().to_rfc3339()),
        (None, _) => None,
    };

    let name = match update.name.trim() {
        "" => DEFAULT_IDEA_NAME.to_string(),
        name => truncate_chars(name, MAX_IDEA_NAME_LEN),
    };
    let complete = update.complete.unwrap_or(idea.complete);

    sqlx::query("UPDATE ideas SET name = ?, complete = ? WHERE id = ?")
        .bind(&name)
        .bind(complete)
        .bind(&idea.id)
        .execute(&mut *tx)
        .await?;

    let post = match (post_text, post_time) {
        (Some(text), Some(created_at)) => {
            let post = Post::new(idea.id.clone(), idea.user_id.clone(), text, created_at);
            sqlx::query(
                "INSERT INTO posts (id, idea_id, user_id, body, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&post.id)
            .bind(&post.idea_id)
            .bind(&post.user_id)
            .bind(&post.body)
            .bind(&post.created_at)
            .execute(&mut *tx)
            .await?;
            Some(post)
        }
        _ => None,
    };

    tx.commit().await?;
    Ok(UpdateOutcome::Updated { post })
}

/// Returns whether anything was deleted.
pub async fn delete_idea(db: &SqlitePool, idea_id: &str, caller_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM ideas WHERE id = ? AND user_id = ?")
        .bind(idea_id)
        .bind(caller_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_post(db: &SqlitePool, post_id: &str, caller_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ? AND user_id = ?")
        .bind(post_id)
        .bind(caller_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Posts of one idea, oldest first.
pub async fn posts_for_idea(db: &SqlitePool, idea_id: &str) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM posts WHERE idea_id = ? ORDER BY created_at, id")
        .bind(idea_id)
        .fetch_all(db)
        .await
}

/// Every idea of a user in creation order, unpaginated.
pub async fn ideas_for_user(db: &SqlitePool, owner_id: &str) -> Result<Vec<Idea>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM ideas WHERE user_id = ? ORDER BY number")
        .bind(owner_id)
        .fetch_all(db)
        .await
}
