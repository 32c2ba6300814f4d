//! Authentication service: login, logout, token validation and password changes.

use std::sync::Arc;

use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::PasswordHasher;
use crate::utils::token::{generate_token, hash_token};
use serde_json::json;
use tracing::info;

/// Service for authenticating API requests via `Token` headers.
///
/// Raw tokens are only ever returned once, from [`Self::login`]. Storage holds
/// their HMAC-SHA256 hash keyed by the server secret, so database read access
/// alone is not enough to impersonate a user.
pub struct AuthService<U: UserRepository, T: TokenRepository> {
    users: Arc<U>,
    tokens: Arc<T>,
    hasher: PasswordHasher,
    signing_secret: String,
}

impl<U: UserRepository, T: TokenRepository> AuthService<U, T> {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` keys token hashes; changing it invalidates every
    /// issued token. Password hashes do not depend on it.
    pub fn new(users: Arc<U>, tokens: Arc<T>, signing_secret: String) -> Self {
        Self {
            users,
            tokens,
            hasher: PasswordHasher::new(),
            signing_secret,
        }
    }

    /// Checks credentials and issues a fresh token, replacing the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is unknown or the password is wrong.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .filter(|user| self.hasher.verify(password, &user.password_hash))
            .ok_or_else(|| {
                AppError::bad_request(
                    "Unable to log in with provided credentials",
                    json!({ "field": "non_field_errors" }),
                )
            })?;

        let token = generate_token();
        self.tokens
            .replace_token(user.id, &hash_token(&self.signing_secret, &token))
            .await?;

        info!(user_id = user.id, "Issued auth token");
        Ok(token)
    }

    /// Revokes the token of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn logout(&self, user_id: i64) -> Result<(), AppError> {
        if self.tokens.delete_for_user(user_id).await? {
            info!(user_id, "Revoked auth token");
        }
        Ok(())
    }

    /// Resolves a raw token to the id of its owner.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure there is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let user_id = self
            .tokens
            .find_user_id(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Invalid token", json!({"reason": "Invalid or revoked token"}))
            })?;

        let _ = self.tokens.update_last_used(&token_hash).await;

        Ok(user_id)
    }

    /// Hashes a password for storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the system RNG fails.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        self.hasher.hash(password)
    }

    /// Replaces the password of `user_id` after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `current_password` is wrong.
    /// Returns [`AppError::NotFound`] if the user no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn set_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": user_id })))?;

        if !self.hasher.verify(current_password, &user.password_hash) {
            return Err(AppError::bad_request(
                "Wrong password",
                json!({ "field": "current_password" }),
            ));
        }

        let password_hash = self.hasher.hash(new_password)?;
        self.users.update_password(user_id, &password_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support;
    use crate::domain::entities::User;
    use crate::domain::repositories::{MockTokenRepository, MockUserRepository};

    const SECRET: &str = "test-signing-secret";

    fn user_with_password(id: i64, password: &str) -> User {
        let mut user = test_support::user(id);
        user.password_hash = PasswordHasher::new().hash(password).unwrap();
        user
    }

    fn service(
        users: MockUserRepository,
        tokens: MockTokenRepository,
    ) -> AuthService<MockUserRepository, MockTokenRepository> {
        AuthService::new(Arc::new(users), Arc::new(tokens), SECRET.to_string())
    }

    #[tokio::test]
    async fn test_login_issues_token_and_stores_hash() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(user_with_password(5, "pass-word"))));

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_replace_token()
            .withf(|user_id, hash| *user_id == 5 && hash.len() == 64)
            .times(1)
            .returning(|_, _| Ok(()));

        let token = service(users, tokens)
            .login("user5@example.com", "pass-word")
            .await
            .unwrap();

        assert_eq!(token.len(), crate::utils::token::TOKEN_LEN);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(user_with_password(5, "pass-word"))));

        let mut tokens = MockTokenRepository::new();
        tokens.expect_replace_token().never();

        let result = service(users, tokens).login("user5@example.com", "nope").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let result = service(users, MockTokenRepository::new())
            .login("ghost@example.com", "x")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let expected_hash = hash_token(SECRET, "valid-token");
        let touched_hash = expected_hash.clone();

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_find_user_id()
            .withf(move |hash| hash == &expected_hash)
            .times(1)
            .returning(|_| Ok(Some(9)));
        tokens
            .expect_update_last_used()
            .withf(move |hash| hash == &touched_hash)
            .times(1)
            .returning(|_| Ok(()));

        let user_id = service(MockUserRepository::new(), tokens)
            .authenticate("valid-token")
            .await
            .unwrap();

        assert_eq!(user_id, 9);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_find_user_id().times(1).returning(|_| Ok(None));

        let result = service(MockUserRepository::new(), tokens)
            .authenticate("invalid-token")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_ignores_touch_failure() {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_find_user_id().returning(|_| Ok(Some(1)));
        tokens
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("db down", json!({}))));

        let result = service(MockUserRepository::new(), tokens)
            .authenticate("token")
            .await;

        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_logout_deletes_token() {
        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_delete_for_user()
            .withf(|user_id| *user_id == 3)
            .times(1)
            .returning(|_| Ok(true));

        assert!(service(MockUserRepository::new(), tokens).logout(3).await.is_ok());
    }

    #[tokio::test]
    async fn test_set_password_checks_current() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_with_password(id, "old"))));
        users.expect_update_password().never();

        let result = service(users, MockTokenRepository::new())
            .set_password(2, "wrong", "new")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_set_password_stores_new_hash() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_with_password(id, "old"))));
        users
            .expect_update_password()
            .withf(|id, hash| *id == 2 && PasswordHasher::new().verify("new", hash))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(users, MockTokenRepository::new())
            .set_password(2, "old", "new")
            .await;

        assert!(result.is_ok());
    }
}
