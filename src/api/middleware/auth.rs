//! Token authentication middleware and the current-user extractor.

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use std::convert::Infallible;

use crate::{error::AppError, state::AppState};

/// The authenticated user of a request.
///
/// Inserted into request extensions by [`layer`]. Use `CurrentUser` in a
/// handler to require authentication, or `Option<CurrentUser>` to accept
/// anonymous requests too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
}

/// Authenticates requests that carry a token.
///
/// # Header Format
///
/// ```text
/// Authorization: Token <key>
/// Authorization: Bearer <key>
/// ```
///
/// Requests without an `Authorization` header pass through anonymously;
/// endpoints that need a user reject them through the [`CurrentUser`]
/// extractor.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is present but malformed, or the
/// token is unknown.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = bearer_token(req.headers())? {
        let id = st.auth_service.authenticate(token).await?;
        req.extensions_mut().insert(CurrentUser { id });
    }

    Ok(next.run(req).await)
}

/// Extracts the token from the `Authorization` header, if any.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let invalid = || {
        AppError::unauthorized(
            "Invalid token header",
            json!({ "reason": "Expected 'Token <key>' or 'Bearer <key>'" }),
        )
    };

    let value = value.to_str().map_err(|_| invalid())?;
    let (scheme, token) = value.trim().split_once(' ').ok_or_else(invalid)?;
    let token = token.trim();

    let known_scheme =
        scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
    if !known_scheme || token.is_empty() {
        return Err(invalid());
    }

    Ok(Some(token))
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().copied().ok_or_else(|| {
            AppError::unauthorized(
                "Authentication credentials were not provided",
                json!({}),
            )
        })
    }
}

impl<S: Send + Sync> OptionalFromRequestParts<S> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().copied())
    }
}
