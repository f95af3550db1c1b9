//! Research project and milestone endpoints.

use crate::auth::middleware::{AppState, CurrentUser};
use crate::error::AppError;
use crate::models::{MilestoneIn, ResearchProjectIn};
use crate::routes::Pagination;
use crate::storage;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// POST /research-projects/ — Create research project
pub async fn create_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<ResearchProjectIn>,
) -> Result<impl IntoResponse, AppError> {
    storage::student::get(&state.db, req.student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    let project = storage::research::insert(&state.db, &req).await?;
    tracing::info!(
        action = "project_created",
        project_id = project.id,
        "Research project created"
    );
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /research-projects/ — List research projects
pub async fn list_projects(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let (skip, limit) = page.clamp();
    let projects = storage::research::list(&state.db, skip, limit).await?;
    Ok(Json(projects))
}

/// GET /research-projects/{id} — Fetch a single project
pub async fn get_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let project = storage::research::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Research project not found".to_string()))?;
    Ok(Json(project))
}

/// PUT /research-projects/{id} — Update a project in place
pub async fn update_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<ResearchProjectIn>,
) -> Result<impl IntoResponse, AppError> {
    let project = storage::research::update(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Research project not found".to_string()))?;
    Ok(Json(project))
}

/// DELETE /research-projects/{id} — Delete a project
pub async fn delete_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !storage::research::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Research project not found".to_string()));
    }
    Ok(Json(serde_json::json!({
        "detail": "Research project deleted successfully"
    })))
}

/// POST /research-projects/{project_id}/milestones/ — Add a milestone
pub async fn create_milestone(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
    Json(req): Json<MilestoneIn>,
) -> Result<impl IntoResponse, AppError> {
    storage::research::get(&state.db, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Research project not found".to_string()))?;

    let milestone = storage::research::insert_milestone(&state.db, project_id, &req).await?;
    Ok((StatusCode::CREATED, Json(milestone)))
}

/// GET /research-projects/{project_id}/milestones/ — List milestones
pub async fn list_milestones(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(project_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let milestones = storage::research::list_milestones(&state.db, project_id).await?;
    Ok(Json(milestones))
}

/// PUT /milestones/{id} — Update a milestone in place
pub async fn update_milestone(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<MilestoneIn>,
) -> Result<impl IntoResponse, AppError> {
    let milestone = storage::research::update_milestone(&state.db, id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Milestone not found".to_string()))?;
    Ok(Json(milestone))
}

/// DELETE /milestones/{id} — Delete a milestone
pub async fn delete_milestone(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !storage::research::delete_milestone(&state.db, id).await? {
        return Err(AppError::NotFound("Milestone not found".to_string()));
    }
    Ok(Json(serde_json::json!({
        "detail": "Milestone deleted successfully"
    })))
}
