//! Course and session repository.

use crate::models::{Course, CourseIn, CourseSession, SessionIn};
use sqlx::SqlitePool;

pub async fn insert(pool: &SqlitePool, course: &CourseIn) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "INSERT INTO courses (title, code, description) VALUES (?, ?, ?) \
         RETURNING id, title, code, description",
    )
    .bind(&course.title)
    .bind(&course.code)
    .bind(&course.description)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, code, description FROM courses ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>("SELECT id, title, code, description FROM courses WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    course: &CourseIn,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "UPDATE courses SET title = ?, code = ?, description = ? WHERE id = ? \
         RETURNING id, title, code, description",
    )
    .bind(&course.title)
    .bind(&course.code)
    .bind(&course.description)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Development seeding: wipe courses and insert the sample catalogue.
pub async fn wipe_and_seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM courses").execute(&mut *tx).await?;
    for (title, code, description) in [
        (
            "Introduction to Python",
            "CS101",
            "A beginner's course on Python programming.",
        ),
        (
            "Web API Development",
            "CS205",
            "Building modern web APIs.",
        ),
        (
            "Database Systems",
            "CS310",
            "Fundamentals of SQL and database design.",
        ),
    ] {
        sqlx::query("INSERT INTO courses (title, code, description) VALUES (?, ?, ?)")
            .bind(title)
            .bind(code)
            .bind(description)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

// ----------------------------------------------------------------------------
// Sessions
// ----------------------------------------------------------------------------

pub async fn insert_session(
    pool: &SqlitePool,
    course_id: i64,
    session: &SessionIn,
) -> Result<CourseSession, sqlx::Error> {
    sqlx::query_as::<_, CourseSession>(
        "INSERT INTO sessions (course_id, session_date, topic) VALUES (?, ?, ?) \
         RETURNING id, course_id, session_date, topic",
    )
    .bind(course_id)
    .bind(session.session_date)
    .bind(&session.topic)
    .fetch_one(pool)
    .await
}

pub async fn list_sessions(
    pool: &SqlitePool,
    course_id: i64,
) -> Result<Vec<CourseSession>, sqlx::Error> {
    sqlx::query_as::<_, CourseSession>(
        "SELECT id, course_id, session_date, topic FROM sessions \
         WHERE course_id = ? ORDER BY session_date, id",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub async fn get_session(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<CourseSession>, sqlx::Error> {
    sqlx::query_as::<_, CourseSession>(
        "SELECT id, course_id, session_date, topic FROM sessions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
