//! API route configuration.
//!
//! Every route sits behind the optional token authentication of
//! [`crate::api::middleware::auth`]; handlers that need a user take a
//! [`CurrentUser`](crate::api::middleware::auth::CurrentUser) argument.

use crate::api::handlers::{
    add_favorite_handler, add_to_cart_handler, create_recipe_handler, delete_avatar_handler,
    delete_recipe_handler, download_shopping_list_handler, get_ingredient_handler,
    get_link_handler, get_recipe_handler, get_tag_handler, get_user_handler,
    list_ingredients_handler, list_recipes_handler, list_subscriptions_handler,
    list_tags_handler, list_users_handler, login_handler, logout_handler, me_handler,
    remove_favorite_handler, remove_from_cart_handler, set_avatar_handler, set_password_handler,
    signup_handler, subscribe_handler, unsubscribe_handler, update_recipe_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Signup and token login; rate limited more strictly.
///
/// # Endpoints
///
/// - `POST   /users`              - Register
/// - `POST   /auth/token/login`   - Issue an auth token
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(signup_handler))
        .route("/auth/token/login", post(login_handler))
}

/// All other API routes.
///
/// # Endpoints
///
/// - `GET    /users`                            - List profiles (paginated)
/// - `GET    /users/me`                         - Current user's profile
/// - `PUT    /users/me/avatar`                  - Set avatar
/// - `DELETE /users/me/avatar`                  - Remove avatar
/// - `POST   /users/set_password`               - Change password
/// - `GET    /users/subscriptions`              - Followed authors (paginated)
/// - `GET    /users/{id}`                       - Profile
/// - `POST   /users/{id}/subscribe`             - Follow an author
/// - `DELETE /users/{id}/subscribe`             - Unfollow an author
/// - `POST   /auth/token/logout`                - Delete the auth token
/// - `GET    /tags`, `/tags/{id}`               - Tags
/// - `GET    /ingredients`, `/ingredients/{id}` - Ingredients
/// - `GET    /recipes`                          - List recipes (paginated, filtered)
/// - `POST   /recipes`                          - Create a recipe
/// - `GET    /recipes/download_shopping_cart`   - Shopping list as text
/// - `GET    /recipes/{id}`                     - Recipe
/// - `PATCH  /recipes/{id}`                     - Update a recipe
/// - `DELETE /recipes/{id}`                     - Delete a recipe
/// - `GET    /recipes/{id}/get-link`            - Short link
/// - `POST   /recipes/{id}/favorite`            - Add to favorites
/// - `DELETE /recipes/{id}/favorite`            - Remove from favorites
/// - `POST   /recipes/{id}/shopping_cart`       - Add to cart
/// - `DELETE /recipes/{id}/shopping_cart`       - Remove from cart
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/me", get(me_handler))
        .route(
            "/users/me/avatar",
            put(set_avatar_handler).delete(delete_avatar_handler),
        )
        .route("/users/set_password", post(set_password_handler))
        .route("/users/subscriptions", get(list_subscriptions_handler))
        .route("/users/{id}", get(get_user_handler))
        .route(
            "/users/{id}/subscribe",
            post(subscribe_handler).delete(unsubscribe_handler),
        )
        .route("/auth/token/logout", post(logout_handler))
        .route("/tags", get(list_tags_handler))
        .route("/tags/{id}", get(get_tag_handler))
        .route("/ingredients", get(list_ingredients_handler))
        .route("/ingredients/{id}", get(get_ingredient_handler))
        .route(
            "/recipes",
            get(list_recipes_handler).post(create_recipe_handler),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_list_handler),
        )
        .route(
            "/recipes/{id}",
            get(get_recipe_handler)
                .patch(update_recipe_handler)
                .delete(delete_recipe_handler),
        )
        .route("/recipes/{id}/get-link", get(get_link_handler))
        .route(
            "/recipes/{id}/favorite",
            post(add_favorite_handler).delete(remove_favorite_handler),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart_handler).delete(remove_from_cart_handler),
        )
}
