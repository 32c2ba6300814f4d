//! Handlers for recipe CRUD and listing.

use axum::{
    Json,
    extract::{OriginalUri, Path, RawQuery, State},
    http::StatusCode,
};
use tracing::warn;
use validator::Validate;

use crate::api::dto::pagination::Page;
use crate::api::dto::recipes::{RecipeListQuery, RecipeRequest, RecipeResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists recipes, newest first.
///
/// # Endpoint
///
/// `GET /api/recipes`
///
/// # Query Parameters
///
/// - `page`, `limit` - pagination (default limit 6)
/// - `author` - author id
/// - `tags` - tag slug, may repeat; a recipe matches if it has any of them
/// - `is_favorited=1` - only the viewer's favorites
/// - `is_in_shopping_cart=1` - only recipes in the viewer's cart
///
/// The last two are ignored for anonymous requests.
pub async fn list_recipes_handler(
    State(state): State<AppState>,
    viewer: Option<CurrentUser>,
    RawQuery(raw): RawQuery,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Page<RecipeResponse>>, AppError> {
    let query = RecipeListQuery::parse(raw.as_deref())?;
    let window = query.pagination.window()?;
    let viewer = viewer.map(|u| u.id);

    let (recipes, count) = state
        .recipe_service
        .list(query.filter(viewer), viewer, window.limit(), window.offset())
        .await?;

    Ok(Json(Page::new(
        recipes.into_iter().map(Into::into).collect(),
        count,
        window,
        &state.public_base_url,
        &uri,
    )))
}

/// `GET /api/recipes/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the recipe does not exist.
pub async fn get_recipe_handler(
    State(state): State<AppState>,
    viewer: Option<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = state
        .recipe_service
        .get(id, viewer.map(|u| u.id))
        .await?;

    Ok(Json(recipe.into()))
}

/// Publishes a recipe.
///
/// # Endpoint
///
/// `POST /api/recipes`
///
/// # Request Body
///
/// ```json
/// {
///   "ingredients": [{ "id": 1123, "amount": 10 }],
///   "tags": [1, 2],
///   "image": "data:image/png;base64,iVBORw0KGgo...",
///   "name": "Pancakes",
///   "text": "Mix and fry",
///   "cooking_time": 20
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request on invalid or repeated tags and ingredients.
/// Returns 404 Not Found if a tag or ingredient id is unknown.
/// Returns 409 Conflict if the author already has a recipe with this name.
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    payload.validate()?;

    let recipe = state
        .recipe_service
        .create(user.id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(recipe.into())))
}

/// Replaces a recipe's contents, including its tags and ingredients.
///
/// # Endpoint
///
/// `PATCH /api/recipes/{id}`
///
/// # Errors
///
/// Returns 403 Forbidden if the current user is not the author.
/// Otherwise the same as [`create_recipe_handler`].
pub async fn update_recipe_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<RecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    payload.validate()?;

    let recipe = state
        .recipe_service
        .update(user.id, id, payload.into())
        .await?;

    Ok(Json(recipe.into()))
}

/// Deletes a recipe and drops its cached short link.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}`
///
/// # Errors
///
/// Returns 403 Forbidden if the current user is not the author.
/// Returns 404 Not Found if the recipe does not exist.
pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let slug = state.short_link_service.slug_of(id).await?;

    state.recipe_service.delete(user.id, id).await?;

    if let Some(slug) = slug
        && let Err(e) = state.cache.invalidate(&slug).await
    {
        warn!("Failed to invalidate cached slug {}: {}", slug, e);
    }

    Ok(StatusCode::NO_CONTENT)
}
