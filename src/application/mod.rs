//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login, logout, token authentication, passwords
//! - [`services::user_service::UserService`] - Registration, profiles, avatars
//! - [`services::subscription_service::SubscriptionService`] - Following authors
//! - [`services::catalog_service::CatalogService`] - Tags and ingredients
//! - [`services::recipe_service::RecipeService`] - Recipe CRUD and listings
//! - [`services::favorite_service::FavoriteService`] - Favorite recipes
//! - [`services::shopping_cart_service::ShoppingCartService`] - Cart and shopping list
//! - [`services::short_link_service::ShortLinkService`] - Recipe short links

pub mod services;
