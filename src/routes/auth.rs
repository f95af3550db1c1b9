//! Registration and login endpoints.

use crate::auth::middleware::AppState;
use crate::auth::{password, token};
use crate::error::AppError;
use crate::models::{CreateUser, LoginForm, TokenResponse, UserOut};
use crate::storage;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};

/// POST /users/ — Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    // Minimal shape validation; the store enforces email uniqueness
    if !req.email.contains('@') || req.email.len() > 254 {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    if req.password.len() < 8 || req.password.len() > 72 {
        return Err(AppError::Validation(
            "Password must be 8-72 characters".to_string(),
        ));
    }

    if storage::user::get_by_email(&state.db, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let digest = password::hash_password(&req.password)?;
    let id = storage::user::insert(&state.db, &req.email, &digest).await?;

    tracing::info!(action = "user_registered", user_id = id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserOut {
            id,
            email: req.email,
        }),
    ))
}

/// POST /token — Exchange credentials for a bearer token
///
/// Accepts an urlencoded form whose `username` field carries the email.
/// Unknown email and wrong password yield the same generic 401 so that
/// account existence is not leaked.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    // Unknown user and bad password take the same rejection path
    let user = match storage::user::get_by_email(&state.db, &form.username).await? {
        Some(user) if password::verify_password(&form.password, &user.hashed_password) => user,
        _ => {
            tracing::warn!(action = "auth_failed", "Login rejected");
            return Err(AppError::Unauthorized(
                "Incorrect email or password".to_string(),
            ));
        }
    };
    let access_token = token::issue(
        &user.email,
        &state.config.token_secret,
        state.config.token_ttl_secs,
    )?;

    tracing::info!(action = "auth_success", user_id = user.id, "User authenticated");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
