//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits on SQLx. Queries are
//! runtime-checked `query_as` calls decoded into private row types, so the
//! crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts and profiles
//! - [`PgTokenRepository`] - Auth token storage
//! - [`PgSubscriptionRepository`] - Author subscriptions
//! - [`PgTagRepository`] / [`PgIngredientRepository`] - Reference data
//! - [`PgRecipeRepository`] - Recipes and read models
//! - [`PgFavoriteRepository`] / [`PgCartRepository`] - Per-user recipe lists
//! - [`PgShortLinkRepository`] - Recipe slugs

mod rows;

pub mod pg_cart_repository;
pub mod pg_favorite_repository;
pub mod pg_ingredient_repository;
pub mod pg_recipe_repository;
pub mod pg_short_link_repository;
pub mod pg_subscription_repository;
pub mod pg_tag_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_cart_repository::PgCartRepository;
pub use pg_favorite_repository::PgFavoriteRepository;
pub use pg_ingredient_repository::PgIngredientRepository;
pub use pg_recipe_repository::PgRecipeRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
pub use pg_subscription_repository::PgSubscriptionRepository;
pub use pg_tag_repository::PgTagRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
