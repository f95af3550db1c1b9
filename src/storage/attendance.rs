//! Attendance repository and bulk reconciliation.
//!
//! The reconciliation key is (session_id, student_id): at most one mark per
//! student per session. A bulk update stages every mark inside one
//! transaction and commits once, so a failure partway through rolls the
//! whole batch back.

use crate::models::AttendanceIn;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

/// Existing marks for a session, keyed by student id.
pub async fn status_by_student(
    pool: &SqlitePool,
    session_id: i64,
) -> Result<HashMap<i64, String>, sqlx::Error> {
    let rows: Vec<(i64, String)> =
        sqlx::query_as("SELECT student_id, status FROM attendance WHERE session_id = ?")
            .bind(session_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}

/// Stage one attendance mark: update the existing row for the key or insert
/// a new one. Later duplicates of the same key within a transaction see the
/// staged row and win. The conflict arm covers a row inserted concurrently
/// by another batch between the lookup and the insert.
pub async fn reconcile_mark(
    conn: &mut SqliteConnection,
    session_id: i64,
    mark: &AttendanceIn,
) -> Result<(), sqlx::Error> {
    let existing: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM attendance WHERE session_id = ? AND student_id = ?")
            .bind(session_id)
            .bind(mark.student_id)
            .fetch_optional(&mut *conn)
            .await?;

    match existing {
        Some((id,)) => {
            sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
                .bind(&mark.status)
                .bind(id)
                .execute(&mut *conn)
                .await?;
        }
        None => {
            sqlx::query(
                "INSERT INTO attendance (session_id, student_id, status) VALUES (?, ?, ?) \
                 ON CONFLICT(session_id, student_id) DO UPDATE SET status = excluded.status",
            )
            .bind(session_id)
            .bind(mark.student_id)
            .bind(&mark.status)
            .execute(&mut *conn)
            .await?;
        }
    }

    Ok(())
}
