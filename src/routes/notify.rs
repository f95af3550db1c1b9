//! Test-email endpoint.

use crate::auth::middleware::{AppState, CurrentUser};
use crate::error::AppError;
use crate::mail;
use crate::models::TestEmailRequest;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// POST /notifications/test — Send a test message through the mail relay
///
/// Fire-and-forget: the send runs as a detached task and the endpoint
/// returns 202 once the message is handed off. Delivery failures are
/// logged, not reported to the caller.
pub async fn send_test_email(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<TestEmailRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mail_config = state
        .config
        .mail
        .as_ref()
        .ok_or_else(|| AppError::Validation("Mail relay is not configured".to_string()))?;

    let message = mail::build_test_message(mail_config, &req.to)?;
    let transport = mail::transport(mail_config)?;

    tracing::info!(action = "test_email_queued", user_id = user.id, "Test email queued");

    tokio::spawn(async move {
        if let Err(e) = mail::send(&transport, message).await {
            tracing::error!(error = %e, "Test email delivery failed");
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "detail": "Test email queued"
        })),
    ))
}
