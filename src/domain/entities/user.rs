//! User accounts and their public profile view.

use chrono::{DateTime, Utc};

use super::recipe::RecipeSummary;

/// A registered account.
///
/// `password_hash` is the Argon2id PHC string produced by
/// [`crate::utils::password::PasswordHasher`]; the raw password is never stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Public view of a user as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    /// Whether the viewer follows this user. Always `false` for anonymous viewers.
    pub is_subscribed: bool,
}

impl Profile {
    /// Builds the profile of `user` for a viewer whose subscription status is known.
    pub fn from_user(user: &User, is_subscribed: bool) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: user.avatar.clone(),
            is_subscribed,
        }
    }
}

/// An author in a subscription listing, with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct AuthorWithRecipes {
    pub profile: Profile,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i64,
}
