use sqlx::SqlitePool;

use crate::models::{Tag, TagWithCount};

/// Result of a link or unlink request on a tag the caller owns.
#[derive(Debug)]
pub struct LinkChange {
    pub tag: Tag,
    pub changed: bool,
}

/// Create a tag. Blank names create nothing; duplicates are allowed.
pub async fn add_tag(db: &SqlitePool, owner_id: &str, name: &str) -> Result<Option<Tag>, sqlx::Error> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }

    let tag = Tag::new(owner_id.to_string(), name);
    sqlx::query("INSERT INTO tags (id, user_id, name) VALUES (?, ?, ?)")
        .bind(&tag.id)
        .bind(&tag.user_id)
        .bind(&tag.name)
        .execute(db)
        .await?;

    Ok(Some(tag))
}

pub async fn delete_tag(db: &SqlitePool, tag_id: &str, caller_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ? AND user_id = ?")
        .bind(tag_id)
        .bind(caller_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Link a tag to an idea. `changed` is false when the link already existed.
/// `None` unless the caller owns both the idea and the tag.
pub async fn link_tag(
    db: &SqlitePool,
    idea_id: &str,
    tag_id: &str,
    caller_id: &str,
) -> Result<Option<LinkChange>, sqlx::Error> {
    let Some(tag) = owned_pair(db, idea_id, tag_id, caller_id).await? else {
        return Ok(None);
    };

    let result = sqlx::query("INSERT OR IGNORE INTO idea_tags (idea_id, tag_id) VALUES (?, ?)")
        .bind(idea_id)
        .bind(tag_id)
        .execute(db)
        .await?;

    Ok(Some(LinkChange {
        tag,
        changed: result.rows_affected() > 0,
    }))
}

/// Remove a link. `changed` is false when there was nothing to remove.
pub async fn unlink_tag(
    db: &SqlitePool,
    idea_id: &str,
    tag_id: &str,
    caller_id: &str,
) -> Result<Option<LinkChange>, sqlx::Error> {
    let Some(tag) = owned_pair(db, idea_id, tag_id, caller_id).await? else {
        return Ok(None);
    };

    let result = sqlx::query("DELETE FROM idea_tags WHERE idea_id = ? AND tag_id = ?")
        .bind(idea_id)
        .bind(tag_id)
        .execute(db)
        .await?;

    Ok(Some(LinkChange {
        tag,
        changed: result.rows_affected() > 0,
    }))
}

async fn owned_pair(
    db: &SqlitePool,
    idea_id: &str,
    tag_id: &str,
    caller_id: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    let idea: Option<(String,)> = sqlx::query_as("SELECT id FROM ideas WHERE id = ? AND user_id = ?")
        .bind(idea_id)
        .bind(caller_id)
        .fetch_optional(db)
        .await?;

    if idea.is_none() {
        return Ok(None);
    }

    sqlx::query_as("SELECT * FROM tags WHERE id = ? AND user_id = ?")
        .bind(tag_id)
        .bind(caller_id)
        .fetch_optional(db)
        .await
}

/// All of a user's tags with how many ideas each is linked to, by name.
pub async fn tags_for_user(db: &SqlitePool, owner_id: &str) -> Result<Vec<TagWithCount>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT t.id, t.name, COUNT(it.idea_id) as count
        FROM tags t
        LEFT JOIN idea_tags it ON it.tag_id = t.id
        WHERE t.user_id = ?
        GROUP BY t.id
        ORDER BY t.name ASC, t.id ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(db)
    .await
}

pub async fn tags_for_idea(db: &SqlitePool, idea_id: &str) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as(
        "SELECT t.* FROM tags t JOIN idea_tags it ON it.tag_id = t.id WHERE it.idea_id = ? ORDER BY t.name",
    )
    .bind(idea_id)
    .fetch_all(db)
    .await
}
