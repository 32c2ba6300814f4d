//! Handlers for user registration, profiles, avatars and passwords.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::{Page, PaginationParams};
use crate::api::dto::users::{
    AvatarRequest, AvatarResponse, ProfileResponse, SetPasswordRequest, SignupRequest,
    UserCreatedResponse,
};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "ann@example.com",
///   "username": "ann",
///   "first_name": "Ann",
///   "last_name": "Smith",
///   "password": "s3cret-pass"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the email or username is taken.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserCreatedResponse>), AppError> {
    payload.validate()?;

    let user = state.user_service.register(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Lists user profiles.
///
/// # Endpoint
///
/// `GET /api/users?page=1&limit=6`
pub async fn list_users_handler(
    State(state): State<AppState>,
    viewer: Option<CurrentUser>,
    Query(params): Query<PaginationParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Page<ProfileResponse>>, AppError> {
    let window = params.window()?;

    let (profiles, count) = state
        .user_service
        .list_profiles(viewer.map(|u| u.id), window.limit(), window.offset())
        .await?;

    Ok(Json(Page::new(
        profiles.into_iter().map(Into::into).collect(),
        count,
        window,
        &state.public_base_url,
        &uri,
    )))
}

/// Returns one user profile.
///
/// # Endpoint
///
/// `GET /api/users/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the user does not exist.
pub async fn get_user_handler(
    State(state): State<AppState>,
    viewer: Option<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state
        .user_service
        .get_profile(id, viewer.map(|u| u.id))
        .await?;

    Ok(Json(profile.into()))
}

/// Returns the current user's profile.
///
/// # Endpoint
///
/// `GET /api/users/me`
pub async fn me_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.user_service.get_profile(user.id, Some(user.id)).await?;
    Ok(Json(profile.into()))
}

/// Replaces the current user's avatar.
///
/// # Endpoint
///
/// `PUT /api/users/me/avatar`
///
/// # Request Body
///
/// ```json
/// { "avatar": "data:image/png;base64,iVBORw0KGgo..." }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the avatar is not a base64 image data URL.
pub async fn set_avatar_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<AvatarRequest>,
) -> Result<Json<AvatarResponse>, AppError> {
    payload.validate()?;

    let avatar = state
        .user_service
        .set_avatar(user.id, payload.avatar)
        .await?;

    Ok(Json(AvatarResponse { avatar }))
}

/// Removes the current user's avatar.
///
/// # Endpoint
///
/// `DELETE /api/users/me/avatar`
pub async fn delete_avatar_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<StatusCode, AppError> {
    state.user_service.clear_avatar(user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Changes the current user's password.
///
/// # Endpoint
///
/// `POST /api/users/set_password`
///
/// # Errors
///
/// Returns 400 Bad Request if `current_password` is wrong.
pub async fn set_password_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<SetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .auth_service
        .set_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
