//! Grade repository and bulk reconciliation.
//!
//! Mirrors the attendance reconciler with key (assignment_id, student_id):
//! staged per batch inside one transaction, committed once at the end,
//! last write wins for duplicate keys in a single batch.

use crate::models::GradeIn;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

/// Existing scores for an assignment, keyed by student id.
pub async fn score_by_student(
    pool: &SqlitePool,
    assignment_id: i64,
) -> Result<HashMap<i64, f64>, sqlx::Error> {
    let rows: Vec<(i64, f64)> =
        sqlx::query_as("SELECT student_id, score FROM grades WHERE assignment_id = ?")
            .bind(assignment_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}

/// Stage one grade: update the existing row for the key or insert a new one.
pub async fn reconcile_score(
    conn: &mut SqliteConnection,
    assignment_id: i64,
    grade: &GradeIn,
) -> Result<(), sqlx::Error> {
    let existing: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM grades WHERE assignment_id = ? AND student_id = ?")
            .bind(assignment_id)
            .bind(grade.student_id)
            .fetch_optional(&mut *conn)
            .await?;

    match existing {
        Some((id,)) => {
            sqlx::query("UPDATE grades SET score = ? WHERE id = ?")
                .bind(grade.score)
                .bind(id)
                .execute(&mut *conn)
                .await?;
        }
        None => {
            sqlx::query(
                "INSERT INTO grades (assignment_id, student_id, score) VALUES (?, ?, ?) \
                 ON CONFLICT(assignment_id, student_id) DO UPDATE SET score = excluded.score",
            )
            .bind(assignment_id)
            .bind(grade.student_id)
            .bind(grade.score)
            .execute(&mut *conn)
            .await?;
        }
    }

    Ok(())
}
