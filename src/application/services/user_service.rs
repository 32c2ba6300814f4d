//! User registration, profiles and avatars.

use std::sync::Arc;

use crate::domain::entities::{NewUser, Profile, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::image::validate_data_url;
use crate::utils::password::PasswordHasher;
use serde_json::json;
use tracing::info;

/// Validated signup input with the raw password.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct UserService<U: UserRepository> {
    users: Arc<U>,
    hasher: PasswordHasher,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }

    /// Registers a user, hashing the password before storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is taken.
    pub async fn register(&self, input: RegisterUser) -> Result<User, AppError> {
        let new_user = NewUser {
            email: input.email,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash: self.hasher.hash(&input.password)?,
        };

        let user = self.users.create(new_user).await?;
        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Returns the profile of `id` as seen by `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_profile(&self, id: i64, viewer: Option<i64>) -> Result<Profile, AppError> {
        self.users
            .profile(id, viewer)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    /// Returns one page of profiles and the total user count.
    pub async fn list_profiles(
        &self,
        viewer: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Profile>, i64), AppError> {
        let profiles = self.users.list_profiles(viewer, limit, offset).await?;
        let count = self.users.count().await?;
        Ok((profiles, count))
    }

    /// Validates and stores an avatar given as a base64 image data URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the data URL is malformed.
    pub async fn set_avatar(&self, user_id: i64, avatar: String) -> Result<String, AppError> {
        validate_data_url("avatar", &avatar)?;

        self.users
            .set_avatar(user_id, Some(avatar))
            .await?
            .ok_or_else(|| AppError::internal("Avatar was not stored", json!({ "id": user_id })))
    }

    pub async fn clear_avatar(&self, user_id: i64) -> Result<(), AppError> {
        self.users.set_avatar(user_id, None).await?;
        Ok(())
    }
}
