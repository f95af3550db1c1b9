//! Request, response, and row models for the API.
//!
//! All models use serde for serialization/deserialization.
//! Row structs derive `sqlx::FromRow` and map 1:1 onto table columns.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// User / Auth Models
// ============================================================================

/// User row, including the password digest. Never serialized to clients.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
}

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
}

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub email: String,
}

/// Login form (`POST /token`, urlencoded). The username field carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

// ============================================================================
// Student Models
// ============================================================================

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Create/update payload for a student.
#[derive(Debug, Deserialize)]
pub struct StudentIn {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

// ============================================================================
// Course / Session Models
// ============================================================================

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub code: String,
    pub description: Option<String>,
}

/// Create/update payload for a course.
#[derive(Debug, Deserialize)]
pub struct CourseIn {
    pub title: String,
    pub code: String,
    pub description: Option<String>,
}

/// A scheduled class meeting within a course.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CourseSession {
    pub id: i64,
    pub course_id: i64,
    pub session_date: NaiveDate,
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionIn {
    pub session_date: NaiveDate,
    pub topic: Option<String>,
}

// ============================================================================
// Attendance Models
// ============================================================================

/// One attendance mark in a bulk update.
#[derive(Debug, Deserialize)]
pub struct AttendanceIn {
    pub student_id: i64,
    pub status: String,
}

/// Bulk attendance update for one session.
#[derive(Debug, Deserialize)]
pub struct BulkAttendanceUpdate {
    pub attendances: Vec<AttendanceIn>,
}

/// A student paired with their attendance status for a session.
/// `status` is null when the student has not been marked yet.
#[derive(Debug, Serialize)]
pub struct StudentAttendance {
    pub student: Student,
    pub status: Option<String>,
}

// ============================================================================
// Assignment / Submission / Grade Models
// ============================================================================

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentIn {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionIn {
    pub student_id: i64,
    pub content: String,
}

/// One grade entry in a bulk update.
#[derive(Debug, Deserialize)]
pub struct GradeIn {
    pub student_id: i64,
    pub score: f64,
}

/// Bulk grade update for one assignment.
#[derive(Debug, Deserialize)]
pub struct BulkGradeUpdate {
    pub grades: Vec<GradeIn>,
}

/// A student paired with their score for an assignment.
/// `score` is null when the assignment has not been graded yet.
#[derive(Debug, Serialize)]
pub struct StudentGrade {
    pub student: Student,
    pub score: Option<f64>,
}

// ============================================================================
// Research Models
// ============================================================================

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ResearchProject {
    pub id: i64,
    pub student_id: i64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResearchProjectIn {
    pub student_id: i64,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Milestone {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub due_date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct MilestoneIn {
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

// ============================================================================
// Notification Models
// ============================================================================

/// Request to send a test message through the configured mail relay.
#[derive(Debug, Deserialize)]
pub struct TestEmailRequest {
    pub to: String,
}
