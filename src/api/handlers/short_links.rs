//! Handlers for recipe short links.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use tracing::{debug, error};

use crate::api::dto::short_link::ShortLinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the recipe's short link, creating it on first request.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}/get-link`
///
/// # Response
///
/// ```json
/// { "short-link": "https://foodgram.example/s/AbCdEf" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the recipe does not exist.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let links = &state.short_link_service;
    let stored = links.get_or_create_slug(id).await?;

    Ok(Json(ShortLinkResponse {
        short_link: links.short_url(&stored),
    }))
}

/// Redirects a short link to the recipe page.
///
/// # Endpoint
///
/// `GET /<prefix>{slug}` (default `/s/{slug}`)
///
/// # Cache Strategy
///
/// - **Cache hit**: Immediate redirect
/// - **Cache miss**: Query DB, spawn async cache write that is undone if the
///   recipe was deleted meanwhile
/// - **Cache error**: Log and fall back to DB
///
/// # Errors
///
/// Returns 404 Not Found if the slug was never issued.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let links = &state.short_link_service;
    let key = links.storage_key(&slug);

    let recipe_id = match state.cache.get_recipe_id(&key).await {
        Ok(Some(id)) => {
            debug!("Cache HIT for {}", key);
            id
        }
        Ok(None) => {
            debug!("Cache MISS for {}", key);

            let id = links.resolve_slug(&slug).await?;

            // Asynchronously update cache (fire-and-forget)
            let cache = state.cache.clone();
            let service = state.short_link_service.clone();
            let slug = slug.clone();
            tokio::spawn(async move {
                if let Err(e) = service.cache_resolution(cache.as_ref(), &slug, id).await {
                    error!("Failed to cache slug: {}", e);
                }
            });

            id
        }
        Err(e) => {
            error!("Cache error: {}", e);

            // Fall back to database on cache error
            links.resolve_slug(&slug).await?
        }
    };

    Ok(Redirect::temporary(&links.recipe_url(recipe_id)))
}
