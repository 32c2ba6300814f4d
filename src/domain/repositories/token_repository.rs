//! Repository trait for auth tokens.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user auth tokens.
///
/// Tokens are stored as HMAC-SHA256 hashes; each user holds at most one token.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_token.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores `token_hash` as the token of `user_id`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn replace_token(&self, user_id: i64, token_hash: &str) -> Result<(), AppError>;

    /// Resolves a token hash to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_user_id(&self, token_hash: &str) -> Result<Option<i64>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Deletes the token of `user_id`. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_for_user(&self, user_id: i64) -> Result<bool, AppError>;
}
