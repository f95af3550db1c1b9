//! Assignment, submission, grading, and calendar-export endpoints.

use crate::auth::middleware::{AppState, CurrentUser};
use crate::calendar;
use crate::error::AppError;
use crate::models::{AssignmentIn, BulkGradeUpdate, StudentGrade, SubmissionIn};
use crate::storage;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

/// POST /courses/{course_id}/assignments/ — Create assignment
pub async fn create_assignment(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<i64>,
    Json(req): Json<AssignmentIn>,
) -> Result<impl IntoResponse, AppError> {
    storage::course::get(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let assignment = storage::assignment::insert(&state.db, course_id, &req).await?;
    tracing::info!(
        action = "assignment_created",
        assignment_id = assignment.id,
        course_id,
        "Assignment created"
    );
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// GET /courses/{course_id}/assignments/ — List assignments for a course
pub async fn list_assignments(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(course_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assignments = storage::assignment::list_for_course(&state.db, course_id).await?;
    Ok(Json(assignments))
}

/// GET /assignments/{id} — Fetch a single assignment
pub async fn get_assignment(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = storage::assignment::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;
    Ok(Json(assignment))
}

/// PUT /assignments/{id} — Update an assignment in place
pub async fn update_assignment(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<AssignmentIn>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = storage::assignment::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;
    Ok(Json(assignment))
}

/// DELETE /assignments/{id} — Delete an assignment
pub async fn delete_assignment(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !storage::assignment::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Assignment not found".to_string()));
    }
    Ok(Json(serde_json::json!({
        "detail": "Assignment deleted successfully"
    })))
}

/// POST /assignments/{assignment_id}/submissions/ — Record a submission
pub async fn create_submission(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(assignment_id): Path<i64>,
    Json(req): Json<SubmissionIn>,
) -> Result<impl IntoResponse, AppError> {
    storage::assignment::get(&state.db, assignment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;
    storage::student::get(&state.db, req.student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    let submitted_at = chrono::Utc::now().naive_utc();
    let submission =
        storage::assignment::insert_submission(&state.db, assignment_id, &req, submitted_at)
            .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// GET /assignments/{assignment_id}/submissions/ — List submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(assignment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let submissions = storage::assignment::list_submissions(&state.db, assignment_id).await?;
    Ok(Json(submissions))
}

/// GET /assignments/{assignment_id}/grades/ — Roster with scores
///
/// Pairs every student with their score for the assignment, null when
/// not graded yet.
pub async fn get_grades(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(assignment_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    storage::assignment::get(&state.db, assignment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;

    let students = storage::student::list_all(&state.db).await?;
    let mut score_map = storage::grade::score_by_student(&state.db, assignment_id).await?;

    let roster: Vec<StudentGrade> = students
        .into_iter()
        .map(|student| {
            let score = score_map.remove(&student.id);
            StudentGrade { student, score }
        })
        .collect();

    Ok(Json(roster))
}

/// POST /assignments/{assignment_id}/grades/ — Bulk grade reconciliation
///
/// Same batch semantics as attendance: one transaction, committed once,
/// all-or-nothing.
pub async fn update_grades(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(assignment_id): Path<i64>,
    Json(req): Json<BulkGradeUpdate>,
) -> Result<impl IntoResponse, AppError> {
    storage::assignment::get(&state.db, assignment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;

    let mut tx = state.db.begin().await?;
    for grade in &req.grades {
        storage::grade::reconcile_score(&mut *tx, assignment_id, grade).await?;
    }
    tx.commit().await?;

    tracing::info!(
        action = "grades_updated",
        assignment_id,
        count = req.grades.len(),
        "Grades reconciled"
    );

    Ok(Json(serde_json::json!({
        "detail": "Grades updated successfully"
    })))
}

/// GET /assignments/{id}/calendar — Export the due date as an iCalendar event
pub async fn export_calendar(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = storage::assignment::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;
    let course = storage::course::get(&state.db, assignment.course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let ics = calendar::due_date_event(&assignment, &course);

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"assignment.ics\"",
            ),
        ],
        ics,
    ))
}
