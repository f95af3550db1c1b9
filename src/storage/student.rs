//! Student repository.

use crate::models::{Student, StudentIn};
use sqlx::SqlitePool;

pub async fn insert(pool: &SqlitePool, student: &StudentIn) -> Result<Student, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "INSERT INTO students (first_name, last_name, email) VALUES (?, ?, ?) \
         RETURNING id, first_name, last_name, email",
    )
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(&student.email)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, first_name, last_name, email FROM students ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

/// Every student, unpaged. Used when pairing the roster with attendance
/// or grade records.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>("SELECT id, first_name, last_name, email FROM students ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "SELECT id, first_name, last_name, email FROM students WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Update a student in place. Returns the updated row, or `None` when the
/// id does not exist.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    student: &StudentIn,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        "UPDATE students SET first_name = ?, last_name = ?, email = ? WHERE id = ? \
         RETURNING id, first_name, last_name, email",
    )
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(&student.email)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a student. Returns `false` when the id does not exist.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Development seeding: wipe students and insert the sample roster.
pub async fn wipe_and_seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM students").execute(&mut *tx).await?;
    for (first, last, email) in [
        ("Alice", "Smith", "alice@example.com"),
        ("Bob", "Johnson", "bob@example.com"),
        ("Charlie", "Brown", "charlie@example.com"),
    ] {
        sqlx::query("INSERT INTO students (first_name, last_name, email) VALUES (?, ?, ?)")
            .bind(first)
            .bind(last)
            .bind(email)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}
