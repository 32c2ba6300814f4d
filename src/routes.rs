//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /s/{slug}`   - Short link redirect (prefix from `SHORT_LINK_PREFIX`)
//! - `GET  /health`     - Health check: DB and cache
//! - `GET  /metrics`    - Prometheus counters
//! - `/api/*`           - REST API (token authentication where required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Optional token, required per handler
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, metrics_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = build(state, Some(behind_proxy)).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// All routes with authentication but without rate limiting or tracing.
pub fn router(state: AppState) -> Router {
    build(state, None)
}

fn build(state: AppState, rate_limited: Option<bool>) -> Router {
    let redirect_path = format!("/{}{{slug}}", state.short_link_service.prefix());

    let mut credentials = api::routes::credential_routes();
    let mut api_routes = api::routes::routes();
    let mut redirect = Router::new().route(&redirect_path, get(redirect_handler));

    if let Some(behind_proxy) = rate_limited {
        let general = rate_limit::layer(behind_proxy);
        credentials = credentials.layer(rate_limit::secure_layer(behind_proxy));
        api_routes = api_routes.layer(general.clone());
        redirect = redirect.layer(general);
    }

    let api_router = credentials
        .merge(api_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(redirect)
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .nest("/api", api_router)
        .with_state(state)
}
