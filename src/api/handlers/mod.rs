//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod health;
pub mod metrics;
pub mod recipes;
pub mod shopping_cart;
pub mod short_links;
pub mod subscriptions;
pub mod users;

pub use auth::{login_handler, logout_handler};
pub use catalog::{
    get_ingredient_handler, get_tag_handler, list_ingredients_handler, list_tags_handler,
};
pub use favorites::{add_favorite_handler, remove_favorite_handler};
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use recipes::{
    create_recipe_handler, delete_recipe_handler, get_recipe_handler, list_recipes_handler,
    update_recipe_handler,
};
pub use shopping_cart::{
    add_to_cart_handler, download_shopping_list_handler, remove_from_cart_handler,
};
pub use short_links::{get_link_handler, redirect_handler};
pub use subscriptions::{list_subscriptions_handler, subscribe_handler, unsubscribe_handler};
pub use users::{
    delete_avatar_handler, get_user_handler, list_users_handler, me_handler, set_avatar_handler,
    set_password_handler, signup_handler,
};
