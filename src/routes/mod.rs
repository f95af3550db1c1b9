//! API route handlers.

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod notify;
pub mod research;
pub mod students;

use crate::auth::middleware::AppState;
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

/// Common `?skip=&limit=` list pagination.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Pagination {
    /// Clamped (skip, limit). SQLite reads a negative LIMIT as unlimited,
    /// so negative inputs collapse to zero instead of reaching the query.
    pub fn clamp(&self) -> (i64, i64) {
        (self.skip.max(0), self.limit.max(0))
    }
}

/// GET / — welcome message (public).
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Student Information System API"
    }))
}

/// Build the API router with all endpoints.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        // Auth endpoints (public)
        .route("/users/", post(auth::create_user))
        .route("/token", post(auth::login))
        // Student endpoints
        .route(
            "/students/",
            post(students::create_student).get(students::list_students),
        )
        .route(
            "/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        // Course endpoints
        .route(
            "/courses/",
            post(courses::create_course).get(courses::list_courses),
        )
        .route(
            "/courses/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        // Session and attendance endpoints
        .route(
            "/courses/{id}/sessions/",
            post(courses::create_session).get(courses::list_sessions),
        )
        .route(
            "/sessions/{id}/attendance/",
            get(courses::get_attendance).post(courses::update_attendance),
        )
        // Assignment, submission, and grade endpoints
        .route(
            "/courses/{id}/assignments/",
            post(assignments::create_assignment).get(assignments::list_assignments),
        )
        .route(
            "/assignments/{id}",
            get(assignments::get_assignment)
                .put(assignments::update_assignment)
                .delete(assignments::delete_assignment),
        )
        .route(
            "/assignments/{id}/submissions/",
            post(assignments::create_submission).get(assignments::list_submissions),
        )
        .route(
            "/assignments/{id}/grades/",
            get(assignments::get_grades).post(assignments::update_grades),
        )
        .route(
            "/assignments/{id}/calendar",
            get(assignments::export_calendar),
        )
        // Research endpoints
        .route(
            "/research-projects/",
            post(research::create_project).get(research::list_projects),
        )
        .route(
            "/research-projects/{id}",
            get(research::get_project)
                .put(research::update_project)
                .delete(research::delete_project),
        )
        .route(
            "/research-projects/{id}/milestones/",
            post(research::create_milestone).get(research::list_milestones),
        )
        .route(
            "/milestones/{id}",
            put(research::update_milestone).delete(research::delete_milestone),
        )
        // Peripherals
        .route("/notifications/test", post(notify::send_test_email))
        .route("/seed-db/", get(students::seed_db))
}
