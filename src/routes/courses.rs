//! Course, session, and attendance endpoints.

use crate::auth::middleware::{AppState, CurrentUser};
use crate::error::AppError;
use crate::models::{BulkAttendanceUpdate, CourseIn, SessionIn, StudentAttendance};
use crate::routes::Pagination;
use crate::storage;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// POST /courses/ — Create course
pub async fn create_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<CourseIn>,
) -> Result<impl IntoResponse, AppError> {
    let course = storage::course::insert(&state.db, &req).await?;
    tracing::info!(action = "course_created", course_id = course.id, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /courses/ — List courses
pub async fn list_courses(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let (skip, limit) = page.clamp();
    let courses = storage::course::list(&state.db, skip, limit).await?;
    Ok(Json(courses))
}

/// GET /courses/{id} — Fetch a single course
pub async fn get_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let course = storage::course::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    Ok(Json(course))
}

/// PUT /courses/{id} — Update a course in place
pub async fn update_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<CourseIn>,
) -> Result<impl IntoResponse, AppError> {
    let course = storage::course::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    Ok(Json(course))
}

/// DELETE /courses/{id} — Delete a course
pub async fn delete_course(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !storage::course::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Course not found".to_string()));
    }
    tracing::info!(action = "course_deleted", course_id = id, "Course deleted");
    Ok(Json(serde_json::json!({
        "detail": "Course deleted successfully"
    })))
}

/// POST /courses/{course_id}/sessions/ — Schedule a session for a course
pub async fn create_session(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<i64>,
    Json(req): Json<SessionIn>,
) -> Result<impl IntoResponse, AppError> {
    storage::course::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let session = storage::course::insert_session(&state.db, course_id, &req).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /courses/{course_id}/sessions/ — List sessions for a course
pub async fn list_sessions(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = storage::course::list_sessions(&state.db, course_id).await?;
    Ok(Json(sessions))
}

/// GET /sessions/{session_id}/attendance/ — Roster with attendance status
///
/// Pairs every student with their recorded status for the session, null
/// when not marked yet.
pub async fn get_attendance(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(session_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    storage::course::get_session(&state.db, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    let students = storage::student::list_all(&state.db).await?;
    let mut status_map = storage::attendance::status_by_student(&state.db, session_id).await?;

    let roster: Vec<StudentAttendance> = students
        .into_iter()
        .map(|student| {
            let status = status_map.remove(&student.id);
            StudentAttendance { student, status }
        })
        .collect();

    Ok(Json(roster))
}

/// POST /sessions/{session_id}/attendance/ — Bulk attendance reconciliation
///
/// Marks are applied in input order inside one transaction and committed
/// once at the end; any failure rolls the whole batch back.
pub async fn update_attendance(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(session_id): Path<i64>,
    Json(req): Json<BulkAttendanceUpdate>,
) -> Result<impl IntoResponse, AppError> {
    storage::course::get_session(&state.db, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;

    let mut tx = state.db.begin().await?;
    for mark in &req.attendances {
        storage::attendance::reconcile_mark(&mut *tx, session_id, mark).await?;
    }
    tx.commit().await?;

    tracing::info!(
        action = "attendance_updated",
        session_id,
        count = req.attendances.len(),
        "Attendance reconciled"
    );

    Ok(Json(serde_json::json!({
        "detail": "Attendance updated successfully"
    })))
}
