use sqlx::SqlitePool;

use crate::models::User;
use crate::password::{hash_password, verify_password};
use crate::store::StoreError;

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

pub async fn create_user(db: &SqlitePool, new: NewUser<'_>) -> Result<User, StoreError> {
    let hash = hash_password(new.password)?;
    let user = User::new(new.username.to_string(), new.email.to_string(), hash);

    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, idea_counter, registered_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.idea_counter)
    .bind(&user.registered_at)
    .execute(db)
    .await?;

    Ok(user)
}

pub async fn find_user_by_username(db: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(db)
        .await
}

pub async fn user_exists(db: &SqlitePool, user_id: &str) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = ?)")
        .bind(user_id)
        .fetch_one(db)
        .await?;
    Ok(exists)
}

/// Which of username/email are already registered.
pub async fn taken(db: &SqlitePool, username: &str, email: &str) -> Result<(bool, bool), sqlx::Error> {
    let (username_taken, email_taken): (bool, bool) = sqlx::query_as(
        r#"
        SELECT
            EXISTS (SELECT 1 FROM users WHERE username = ?),
            EXISTS (SELECT 1 FROM users WHERE email = ?)
        "#,
    )
    .bind(username)
    .bind(email)
    .fetch_one(db)
    .await?;
    Ok((username_taken, email_taken))
}

pub async fn authenticate(db: &SqlitePool, username: &str, password: &str) -> Result<Option<User>, StoreError> {
    let Some(user) = find_user_by_username(db, username).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Remove a user; ideas, posts, tags and tag links go with it.
pub async fn delete_user(db: &SqlitePool, user_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
