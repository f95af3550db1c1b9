//! Research project and milestone repository.

use crate::models::{Milestone, MilestoneIn, ResearchProject, ResearchProjectIn};
use sqlx::SqlitePool;

pub async fn insert(
    pool: &SqlitePool,
    project: &ResearchProjectIn,
) -> Result<ResearchProject, sqlx::Error> {
    sqlx::query_as::<_, ResearchProject>(
        "INSERT INTO research_projects (student_id, title, description) VALUES (?, ?, ?) \
         RETURNING id, student_id, title, description",
    )
    .bind(project.student_id)
    .bind(&project.title)
    .bind(&project.description)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<ResearchProject>, sqlx::Error> {
    sqlx::query_as::<_, ResearchProject>(
        "SELECT id, student_id, title, description FROM research_projects \
         ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<ResearchProject>, sqlx::Error> {
    sqlx::query_as::<_, ResearchProject>(
        "SELECT id, student_id, title, description FROM research_projects WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    project: &ResearchProjectIn,
) -> Result<Option<ResearchProject>, sqlx::Error> {
    sqlx::query_as::<_, ResearchProject>(
        "UPDATE research_projects SET student_id = ?, title = ?, description = ? WHERE id = ? \
         RETURNING id, student_id, title, description",
    )
    .bind(project.student_id)
    .bind(&project.title)
    .bind(&project.description)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM research_projects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ----------------------------------------------------------------------------
// Milestones
// ----------------------------------------------------------------------------

pub async fn insert_milestone(
    pool: &SqlitePool,
    project_id: i64,
    milestone: &MilestoneIn,
) -> Result<Milestone, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        "INSERT INTO milestones (project_id, title, due_date, completed) VALUES (?, ?, ?, ?) \
         RETURNING id, project_id, title, due_date, completed",
    )
    .bind(project_id)
    .bind(&milestone.title)
    .bind(milestone.due_date)
    .bind(milestone.completed)
    .fetch_one(pool)
    .await
}

pub async fn list_milestones(
    pool: &SqlitePool,
    project_id: i64,
) -> Result<Vec<Milestone>, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        "SELECT id, project_id, title, due_date, completed FROM milestones \
         WHERE project_id = ? ORDER BY due_date, id",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn update_milestone(
    pool: &SqlitePool,
    id: i64,
    milestone: &MilestoneIn,
) -> Result<Option<Milestone>, sqlx::Error> {
    sqlx::query_as::<_, Milestone>(
        "UPDATE milestones SET title = ?, due_date = ?, completed = ? WHERE id = ? \
         RETURNING id, project_id, title, due_date, completed",
    )
    .bind(&milestone.title)
    .bind(milestone.due_date)
    .bind(milestone.completed)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_milestone(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM milestones WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
