//! Assignment and submission repository.

use crate::models::{Assignment, AssignmentIn, Submission, SubmissionIn};
use chrono::NaiveDateTime;
use sqlx::SqlitePool;

pub async fn insert(
    pool: &SqlitePool,
    course_id: i64,
    assignment: &AssignmentIn,
) -> Result<Assignment, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "INSERT INTO assignments (course_id, title, description, due_date) VALUES (?, ?, ?, ?) \
         RETURNING id, course_id, title, description, due_date",
    )
    .bind(course_id)
    .bind(&assignment.title)
    .bind(&assignment.description)
    .bind(assignment.due_date)
    .fetch_one(pool)
    .await
}

pub async fn list_for_course(
    pool: &SqlitePool,
    course_id: i64,
) -> Result<Vec<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, course_id, title, description, due_date FROM assignments \
         WHERE course_id = ? ORDER BY due_date, id",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "SELECT id, course_id, title, description, due_date FROM assignments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    assignment: &AssignmentIn,
) -> Result<Option<Assignment>, sqlx::Error> {
    sqlx::query_as::<_, Assignment>(
        "UPDATE assignments SET title = ?, description = ?, due_date = ? WHERE id = ? \
         RETURNING id, course_id, title, description, due_date",
    )
    .bind(&assignment.title)
    .bind(&assignment.description)
    .bind(assignment.due_date)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM assignments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ----------------------------------------------------------------------------
// Submissions
// ----------------------------------------------------------------------------

pub async fn insert_submission(
    pool: &SqlitePool,
    assignment_id: i64,
    submission: &SubmissionIn,
    submitted_at: NaiveDateTime,
) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "INSERT INTO submissions (assignment_id, student_id, content, submitted_at) \
         VALUES (?, ?, ?, ?) \
         RETURNING id, assignment_id, student_id, content, submitted_at",
    )
    .bind(assignment_id)
    .bind(submission.student_id)
    .bind(&submission.content)
    .bind(submitted_at)
    .fetch_one(pool)
    .await
}

pub async fn list_submissions(
    pool: &SqlitePool,
    assignment_id: i64,
) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "SELECT id, assignment_id, student_id, content, submitted_at FROM submissions \
         WHERE assignment_id = ? ORDER BY submitted_at, id",
    )
    .bind(assignment_id)
    .fetch_all(pool)
    .await
}
