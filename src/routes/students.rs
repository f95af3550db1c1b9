//! Student CRUD endpoints and the development seed endpoint.

use crate::auth::middleware::{AppState, CurrentUser};
use crate::error::AppError;
use crate::models::StudentIn;
use crate::routes::Pagination;
use crate::storage;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// POST /students/ — Create student
pub async fn create_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<StudentIn>,
) -> Result<impl IntoResponse, AppError> {
    let student = storage::student::insert(&state.db, &req).await?;
    tracing::info!(action = "student_created", student_id = student.id, "Student created");
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /students/ — List students
pub async fn list_students(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let (skip, limit) = page.clamp();
    let students = storage::student::list(&state.db, skip, limit).await?;
    Ok(Json(students))
}

/// GET /students/{id} — Fetch a single student
pub async fn get_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student = storage::student::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    Ok(Json(student))
}

/// PUT /students/{id} — Update a student in place
pub async fn update_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<StudentIn>,
) -> Result<impl IntoResponse, AppError> {
    let student = storage::student::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    Ok(Json(student))
}

/// DELETE /students/{id} — Delete a student
pub async fn delete_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !storage::student::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Student not found".to_string()));
    }
    tracing::info!(action = "student_deleted", student_id = id, "Student deleted");
    Ok(Json(serde_json::json!({
        "detail": "Student deleted successfully"
    })))
}

/// GET /seed-db/ — Repopulate students and courses with sample data
///
/// Development convenience: wipes both tables first.
pub async fn seed_db(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    storage::student::wipe_and_seed(&state.db).await?;
    storage::course::wipe_and_seed(&state.db).await?;
    tracing::info!(action = "db_seeded", "Database reseeded with sample data");
    Ok(Json(serde_json::json!({
        "detail": "Database has been seeded with sample data."
    })))
}
