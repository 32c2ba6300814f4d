//! Handlers for the shopping cart and the shopping list download.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::recipes::RecipeSummaryResponse;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /api/recipes/{id}/shopping_cart`
///
/// # Errors
///
/// Returns 400 Bad Request if the recipe is already in the cart.
/// Returns 404 Not Found if the recipe does not exist.
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), AppError> {
    let summary = state.shopping_cart_service.add(user.id, id).await?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

/// `DELETE /api/recipes/{id}/shopping_cart`
///
/// # Errors
///
/// Returns 404 Not Found if the recipe does not exist or is not in the cart.
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.shopping_cart_service.remove(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Downloads the aggregated shopping list as a text attachment.
///
/// # Endpoint
///
/// `GET /api/recipes/download_shopping_cart`
///
/// # Response
///
/// ```text
/// Shopping list:
/// 1. Flour - 300 g.
/// 2. Salt - 15 g.
/// ```
pub async fn download_shopping_list_handler(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let list = state
        .shopping_cart_service
        .build_shopping_list(user.id)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        list,
    ))
}
