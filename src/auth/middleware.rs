//! Axum extractor for the authenticated caller.

use crate::config::Config;
use crate::error::AppError;
use crate::storage;
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
}

/// Authenticated user extractor.
///
/// Parses `Authorization: Bearer {token}`, verifies signature and expiry,
/// then re-fetches the user row — a structurally valid token for a user
/// that no longer exists is rejected. Returns 401 on any failure.
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        // Parse Bearer token
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization format".to_string()))?;

        // Verify signature and expiry, recovering the subject email
        let email = crate::auth::token::resolve(token, &state.config.token_secret)?;

        // Look up the current user record
        let user = storage::user::get_by_email(&state.db, &email)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Could not validate credentials".to_string())
            })?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
        })
    }
}
