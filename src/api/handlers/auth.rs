//! Handlers for token login and logout.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, TokenResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Issues a fresh auth token, replacing the user's previous one.
///
/// Only one token per user is live at a time, so logging in again ends any
/// other session.
///
/// # Endpoint
///
/// `POST /api/auth/token/login`
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "auth_token": "6Zq0..." }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request on wrong email or password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    payload.validate()?;

    let auth_token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { auth_token })))
}

/// Deletes the current user's token.
///
/// # Endpoint
///
/// `POST /api/auth/token/logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<StatusCode, AppError> {
    state.auth_service.logout(user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
