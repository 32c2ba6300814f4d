//! Handlers for following authors.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::pagination::{Page, PaginationParams};
use crate::api::dto::subscriptions::{AuthorResponse, RecipesLimitParams};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Subscribes the current user to an author.
///
/// # Endpoint
///
/// `POST /api/users/{id}/subscribe?recipes_limit=3`
///
/// # Errors
///
/// Returns 400 Bad Request on self-subscription or if already subscribed.
/// Returns 404 Not Found if the author does not exist.
pub async fn subscribe_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(author_id): Path<i64>,
    Query(limit): Query<RecipesLimitParams>,
) -> Result<(StatusCode, Json<AuthorResponse>), AppError> {
    let author = state
        .subscription_service
        .subscribe(user.id, author_id, limit.get())
        .await?;

    Ok((StatusCode::CREATED, Json(author.into())))
}

/// `DELETE /api/users/{id}/subscribe`
///
/// # Errors
///
/// Returns 404 Not Found if the author does not exist or is not followed.
pub async fn unsubscribe_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(author_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .subscription_service
        .unsubscribe(user.id, author_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists authors the current user follows.
///
/// # Endpoint
///
/// `GET /api/users/subscriptions?page=1&limit=6&recipes_limit=3`
pub async fn list_subscriptions_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<PaginationParams>,
    Query(limit): Query<RecipesLimitParams>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Page<AuthorResponse>>, AppError> {
    let window = params.window()?;

    let (authors, count) = state
        .subscription_service
        .list(user.id, window.limit(), window.offset(), limit.get())
        .await?;

    Ok(Json(Page::new(
        authors.into_iter().map(Into::into).collect(),
        count,
        window,
        &state.public_base_url,
        &uri,
    )))
}
