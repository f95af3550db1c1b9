//! Integration tests for the registrar API.
//!
//! Each test spawns the real router on an ephemeral port against its own
//! in-memory SQLite database, then drives it over HTTP with reqwest.

use registrar::{auth::middleware::AppState, config::Config, routes, storage};
use reqwest::StatusCode;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        token_secret: "integration-test-signing-secret".to_string(),
        token_ttl_secs: 900,
        cors_origins: vec![],
        mail: None,
    }
}

/// Spin up a test server with a fresh in-memory database and return its
/// base URL.
async fn spawn_test_server() -> String {
    // One connection so every query sees the same in-memory database
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");
    storage::init_schema(&pool)
        .await
        .expect("Failed to initialize schema");

    let state = AppState {
        db: pool,
        config: Arc::new(test_config()),
    };

    let app = routes::api_router().with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Helper: register a user and log in, returning a bearer token.
async fn register_and_login(client: &reqwest::Client, base_url: &str) -> String {
    let resp = client
        .post(format!("{}/users/", base_url))
        .json(&serde_json::json!({
            "email": "teacher@example.com",
            "password": "longenough1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{}/token", base_url))
        .form(&[("username", "teacher@example.com"), ("password", "longenough1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

/// Helper: create a student, returning its id.
async fn create_student(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    first: &str,
    last: &str,
    email: &str,
) -> i64 {
    let resp = client
        .post(format!("{}/students/", base_url))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "first_name": first,
            "last_name": last,
            "email": email
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = resp.json().await.unwrap();
    body["id"].as_i64().unwrap()
}

/// Helper: create a course, returning its id.
async fn create_course(client: &reqwest::Client, base_url: &str, token: &str, code: &str) -> i64 {
    let resp = client
        .post(format!("{}/courses/", base_url))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "title": "Database Systems",
            "code": code,
            "description": "Fundamentals of SQL and database design."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = resp.json().await.unwrap();
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_register_login_and_protected_access() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();

    // Register
    let resp = client
        .post(format!("{}/users/", base_url))
        .json(&serde_json::json!({
            "email": "a@x.com",
            "password": "longenough1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["email"], "a@x.com");
    assert!(body["id"].as_i64().unwrap() > 0);

    // Duplicate email is rejected
    let resp = client
        .post(format!("{}/users/", base_url))
        .json(&serde_json::json!({
            "email": "a@x.com",
            "password": "longenough1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Email already registered");

    // Wrong password: generic 401 with the bearer challenge header
    let resp = client
        .post(format!("{}/token", base_url))
        .form(&[("username", "a@x.com"), ("password", "wrongpassword")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("www-authenticate").unwrap(), "Bearer");
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Incorrect email or password");

    // Unknown user: indistinguishable from wrong password
    let resp = client
        .post(format!("{}/token", base_url))
        .form(&[("username", "nobody@x.com"), ("password", "longenough1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Incorrect email or password");

    // Correct login
    let resp = client
        .post(format!("{}/token", base_url))
        .form(&[("username", "a@x.com"), ("password", "longenough1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let token = body["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["token_type"], "bearer");

    // Protected endpoint without a header
    let resp = client
        .get(format!("{}/students/", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // With a garbage token
    let resp = client
        .get(format!("{}/students/", base_url))
        .bearer_auth("not.a.token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // With the issued token
    let resp = client
        .get(format!("{}/students/", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_registration_validation() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();

    // Too-short password
    let resp = client
        .post(format!("{}/users/", base_url))
        .json(&serde_json::json!({"email": "a@x.com", "password": "short"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Malformed email
    let resp = client
        .post(format!("{}/users/", base_url))
        .json(&serde_json::json!({"email": "not-an-email", "password": "longenough1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_student_crud() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    let id = create_student(&client, &base_url, &token, "Alice", "Smith", "alice@example.com").await;

    // Fetch
    let resp = client
        .get(format!("{}/students/{}", base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["first_name"], "Alice");

    // Update in place
    let resp = client
        .put(format!("{}/students/{}", base_url, id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "first_name": "Alicia",
            "last_name": "Smith",
            "email": "alice@example.com"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["first_name"], "Alicia");
    assert_eq!(body["id"], id);

    // Delete
    let resp = client
        .delete(format!("{}/students/{}", base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Student deleted successfully");

    // Gone
    let resp = client
        .get(format!("{}/students/{}", base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Update of a missing student is 404 too
    let resp = client
        .put(format!("{}/students/{}", base_url, id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "first_name": "X",
            "last_name": "Y",
            "email": "x@example.com"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_list_pagination() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    for i in 0..5 {
        create_student(
            &client,
            &base_url,
            &token,
            "Student",
            &format!("Number{}", i),
            &format!("s{}@example.com", i),
        )
        .await;
    }

    let resp = client
        .get(format!("{}/students/?skip=2&limit=2", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["last_name"], "Number2");

    // Negative limit must not fall through to SQLite, where LIMIT -1
    // means "no limit"; it clamps to zero and returns nothing.
    let resp = client
        .get(format!("{}/students/?limit=-1", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body.as_array().unwrap().is_empty());

    // Negative skip reads from the start of the list.
    let resp = client
        .get(format!("{}/students/?skip=-3&limit=1", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["last_name"], "Number0");
}

#[tokio::test]
async fn test_duplicate_unique_fields_are_conflicts() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    create_student(&client, &base_url, &token, "Alice", "Smith", "alice@example.com").await;

    // Re-using an existing student email is a client error, not a 500.
    let resp = client
        .post(format!("{}/students/", base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "first_name": "Other",
            "last_name": "Person",
            "email": "alice@example.com"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Duplicate value for a unique field");

    // Same for a duplicate course code.
    create_course(&client, &base_url, &token, "CS310").await;
    let resp = client
        .post(format!("{}/courses/", base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Another Offering",
            "code": "CS310",
            "description": "Second section."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Duplicate value for a unique field");
}

#[tokio::test]
async fn test_sessions_require_existing_course() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    let resp = client
        .post(format!("{}/courses/999/sessions/", base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({"session_date": "2025-03-14", "topic": "Joins"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let course_id = create_course(&client, &base_url, &token, "CS310").await;
    let resp = client
        .post(format!("{}/courses/{}/sessions/", base_url, course_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({"session_date": "2025-03-14", "topic": "Joins"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let session: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(session["course_id"], course_id);

    let resp = client
        .get(format!("{}/courses/{}/sessions/", base_url, course_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let sessions: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(sessions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_attendance_reconciliation() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    let alice = create_student(&client, &base_url, &token, "Alice", "Smith", "alice@example.com").await;
    let bob = create_student(&client, &base_url, &token, "Bob", "Johnson", "bob@example.com").await;
    let course_id = create_course(&client, &base_url, &token, "CS310").await;

    let resp = client
        .post(format!("{}/courses/{}/sessions/", base_url, course_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({"session_date": "2025-03-14"}))
        .send()
        .await
        .unwrap();
    let session: serde_json::Value = resp.json().await.unwrap();
    let session_id = session["id"].as_i64().unwrap();

    // Duplicate key in one batch: the later entry wins
    let resp = client
        .post(format!("{}/sessions/{}/attendance/", base_url, session_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "attendances": [
                {"student_id": alice, "status": "absent"},
                {"student_id": alice, "status": "present"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/sessions/{}/attendance/", base_url, session_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let roster: serde_json::Value = resp.json().await.unwrap();
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 2);

    let status_of = |id: i64| {
        roster
            .iter()
            .find(|entry| entry["student"]["id"].as_i64() == Some(id))
            .map(|entry| entry["status"].clone())
            .unwrap()
    };
    assert_eq!(status_of(alice), "present");
    // Unmarked students appear with a null status
    assert!(status_of(bob).is_null());

    // Reconciling again mutates the existing record rather than duplicating
    let resp = client
        .post(format!("{}/sessions/{}/attendance/", base_url, session_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "attendances": [{"student_id": alice, "status": "late"}]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/sessions/{}/attendance/", base_url, session_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let roster: serde_json::Value = resp.json().await.unwrap();
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 2);
    let alice_entry = roster
        .iter()
        .find(|entry| entry["student"]["id"].as_i64() == Some(alice))
        .unwrap();
    assert_eq!(alice_entry["status"], "late");

    // Unknown session is a 404
    let resp = client
        .post(format!("{}/sessions/999/attendance/", base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({"attendances": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grade_reconciliation() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    let alice = create_student(&client, &base_url, &token, "Alice", "Smith", "alice@example.com").await;
    let bob = create_student(&client, &base_url, &token, "Bob", "Johnson", "bob@example.com").await;
    let course_id = create_course(&client, &base_url, &token, "CS310").await;

    let resp = client
        .post(format!("{}/courses/{}/assignments/", base_url, course_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Problem set 3",
            "due_date": "2025-03-14T23:59:00"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let assignment: serde_json::Value = resp.json().await.unwrap();
    let assignment_id = assignment["id"].as_i64().unwrap();

    // Last write wins within one batch
    let resp = client
        .post(format!("{}/assignments/{}/grades/", base_url, assignment_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "grades": [
                {"student_id": alice, "score": 55.0},
                {"student_id": alice, "score": 87.5}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/assignments/{}/grades/", base_url, assignment_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let roster: serde_json::Value = resp.json().await.unwrap();
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 2);
    let score_of = |id: i64| {
        roster
            .iter()
            .find(|entry| entry["student"]["id"].as_i64() == Some(id))
            .map(|entry| entry["score"].clone())
            .unwrap()
    };
    assert_eq!(score_of(alice), 87.5);
    assert!(score_of(bob).is_null());

    // Regrade updates in place
    let resp = client
        .post(format!("{}/assignments/{}/grades/", base_url, assignment_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "grades": [{"student_id": alice, "score": 92.0}]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/assignments/{}/grades/", base_url, assignment_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let roster: serde_json::Value = resp.json().await.unwrap();
    let roster = roster.as_array().unwrap();
    let alice_entry = roster
        .iter()
        .find(|entry| entry["student"]["id"].as_i64() == Some(alice))
        .unwrap();
    assert_eq!(alice_entry["score"], 92.0);
}

#[tokio::test]
async fn test_submissions() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    let alice = create_student(&client, &base_url, &token, "Alice", "Smith", "alice@example.com").await;
    let course_id = create_course(&client, &base_url, &token, "CS310").await;

    let resp = client
        .post(format!("{}/courses/{}/assignments/", base_url, course_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Essay",
            "due_date": "2025-04-01T12:00:00"
        }))
        .send()
        .await
        .unwrap();
    let assignment: serde_json::Value = resp.json().await.unwrap();
    let assignment_id = assignment["id"].as_i64().unwrap();

    // Unknown student is rejected
    let resp = client
        .post(format!("{}/assignments/{}/submissions/", base_url, assignment_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({"student_id": 999, "content": "my essay"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .post(format!("{}/assignments/{}/submissions/", base_url, assignment_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({"student_id": alice, "content": "my essay"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let submission: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(submission["student_id"], alice);
    assert!(submission["submitted_at"].is_string());

    let resp = client
        .get(format!("{}/assignments/{}/submissions/", base_url, assignment_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let submissions: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(submissions.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_calendar_export() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    let course_id = create_course(&client, &base_url, &token, "CS310").await;
    let resp = client
        .post(format!("{}/courses/{}/assignments/", base_url, course_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Problem set 3",
            "due_date": "2025-03-14T23:59:00"
        }))
        .send()
        .await
        .unwrap();
    let assignment: serde_json::Value = resp.json().await.unwrap();
    let assignment_id = assignment["id"].as_i64().unwrap();

    let resp = client
        .get(format!("{}/assignments/{}/calendar", base_url, assignment_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/calendar"));
    let body = resp.text().await.unwrap();
    assert!(body.contains("BEGIN:VCALENDAR"));
    assert!(body.contains("DTSTART:20250314T235900"));
    assert!(body.contains("SUMMARY:CS310 due: Problem set 3"));
}

#[tokio::test]
async fn test_research_projects_and_milestones() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    let alice = create_student(&client, &base_url, &token, "Alice", "Smith", "alice@example.com").await;

    let resp = client
        .post(format!("{}/research-projects/", base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "student_id": alice,
            "title": "Query optimizer survey",
            "description": "Independent study"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let project: serde_json::Value = resp.json().await.unwrap();
    let project_id = project["id"].as_i64().unwrap();

    let resp = client
        .post(format!("{}/research-projects/{}/milestones/", base_url, project_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Literature review",
            "due_date": "2025-05-01"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let milestone: serde_json::Value = resp.json().await.unwrap();
    let milestone_id = milestone["id"].as_i64().unwrap();
    assert_eq!(milestone["completed"], false);

    // Mark complete
    let resp = client
        .put(format!("{}/milestones/{}", base_url, milestone_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Literature review",
            "due_date": "2025-05-01",
            "completed": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let milestone: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(milestone["completed"], true);

    // Deleting the project cascades to its milestones
    let resp = client
        .delete(format!("{}/research-projects/{}", base_url, project_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .put(format!("{}/milestones/{}", base_url, milestone_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Literature review",
            "due_date": "2025-05-01",
            "completed": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seed_db() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    // Pre-existing rows are wiped by the seed
    create_student(&client, &base_url, &token, "Zed", "Old", "zed@example.com").await;

    let resp = client
        .get(format!("{}/seed-db/", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/students/", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let students: serde_json::Value = resp.json().await.unwrap();
    let students = students.as_array().unwrap().clone();
    assert_eq!(students.len(), 3);
    assert!(students.iter().all(|s| s["email"] != "zed@example.com"));

    let resp = client
        .get(format!("{}/courses/", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let courses: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(courses.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_root_is_public() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/", base_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Welcome to the Student Information System API"
    );
}

#[tokio::test]
async fn test_mail_unconfigured_is_rejected() {
    let base_url = spawn_test_server().await;
    let client = reqwest::Client::new();
    let token = register_and_login(&client, &base_url).await;

    let resp = client
        .post(format!("{}/notifications/test", base_url))
        .bearer_auth(&token)
        .json(&serde_json::json!({"to": "someone@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Mail relay is not configured");
}
