//! User repository.

use crate::models::User;
use sqlx::SqlitePool;

/// Look up a user by email. Emails are unique.
pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, email, hashed_password FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Insert a new user and return its row id.
pub async fn insert(
    pool: &SqlitePool,
    email: &str,
    hashed_password: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO users (email, hashed_password) VALUES (?, ?)")
        .bind(email)
        .bind(hashed_password)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}
