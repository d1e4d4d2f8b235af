use serde::Deserialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::fs;
use uuid::Uuid;

use crate::models::idea::{DEFAULT_IDEA_NAME, MAX_IDEA_NAME_LEN};
use crate::models::{truncate_chars, Post, Tag};
use crate::store::{self, NewUser};

#[derive(Deserialize)]
struct ExportFile {
    ideas: Vec<ImportedIdea>,
}

#[derive(Deserialize)]
struct ImportedIdea {
    name: String,
    #[serde(default)]
    complete: bool,
    created_at: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    posts: Vec<ImportedPost>,
}

#[derive(Deserialize)]
struct ImportedPost {
    body: String,
    created_at: Option<String>,
}

/// Load a `/export` file into `username`'s board. Ideas are renumbered from
/// the user's counter; tags are matched by name and created when missing.
pub async fn import_data(pool: &SqlitePool, file_path: &str, username: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(user) = store::find_user_by_username(pool, username).await? else {
        return Err(format!("User '{}' not found", username).into());
    };

    let content = fs::read_to_string(file_path)?;
    let export: ExportFile = serde_json::from_str(&content)?;

    let now = chrono::Utc::now().to_rfc3339();
    let mut imported = 0;
    let mut tx = pool.begin().await?;

    let existing: Vec<Tag> = sqlx::query_as("SELECT * FROM tags WHERE user_id = ?")
        .bind(&user.id)
        .fetch_all(&mut *tx)
        .await?;
    let mut tag_ids: HashMap<String, String> = HashMap::new();
    for tag in existing {
        tag_ids.entry(tag.name).or_insert(tag.id);
    }

    for idea in export.ideas {
        let (number,): (i64,) = sqlx::query_as(
            "UPDATE users SET idea_counter = idea_counter + 1 WHERE id = ? RETURNING idea_counter",
        )
        .bind(&user.id)
        .fetch_one(&mut *tx)
        .await?;

        let id = Uuid::new_v4().to_string();
        let name = match idea.name.trim() {
            "" => DEFAULT_IDEA_NAME.to_string(),
            name => truncate_chars(name, MAX_IDEA_NAME_LEN),
        };
        let created_at = idea.created_at.unwrap_or_else(|| now.clone());

        sqlx::query(
            "INSERT INTO ideas (id, user_id, name, number, complete, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&user.id)
        .bind(&name)
        .bind(number)
        .bind(idea.complete)
        .bind(&created_at)
        .execute(&mut *tx)
        .await?;

        for post in idea.posts {
            if post.body.trim().is_empty() {
                continue;
            }
            let created_at = post.created_at.unwrap_or_else(|| now.clone());
            let post = Post::new(id.clone(), user.id.clone(), &post.body, created_at);
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
        }

        for tag_name in &idea.tags {
            let tag_name = tag_name.trim();
            if tag_name.is_empty() {
                continue;
            }

            let tag = Tag::new(user.id.clone(), tag_name);
            let tag_id = match tag_ids.get(&tag.name) {
                Some(id) => id.clone(),
                None => {
                    sqlx::query("INSERT INTO tags (id, user_id, name) VALUES (?, ?, ?)")
                        .bind(&tag.id)
                        .bind(&tag.user_id)
                        .bind(&tag.name)
                        .execute(&mut *tx)
                        .await?;
                    tag_ids.insert(tag.name.clone(), tag.id.clone());
                    tag.id
                }
            };

            sqlx::query("INSERT OR IGNORE INTO idea_tags (idea_id, tag_id) VALUES (?, ?)")
                .bind(&id)
                .bind(&tag_id)
                .execute(&mut *tx)
                .await?;
        }

        imported += 1;
    }

    tx.commit().await?;
    tracing::info!(imported, username, "import finished");
    println!("Imported {} ideas", imported);
    Ok(())
}

pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = store::create_user(pool, NewUser { username, email, password }).await?;

    println!("Created user:");
    println!("  ID: {}", user.id);
    println!("  Username: {}", user.username);
    println!("  Email: {}", user.email);

    Ok(())
}
