//! Handlers for adding and removing favorite recipes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::recipes::RecipeSummaryResponse;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/recipes/{id}/favorite`
///
/// # Errors
///
/// Returns 400 Bad Request if the recipe is already a favorite.
/// Returns 404 Not Found if the recipe does not exist.
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), AppError> {
    let summary = state.favorite_service.add(user.id, id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

/// `DELETE /api/recipes/{id}/favorite`
///
/// # Errors
///
/// Returns 404 Not Found if the recipe does not exist or is not a favorite.
pub async fn remove_favorite_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.favorite_service.remove(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
