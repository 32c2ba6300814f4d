#![allow(dead_code)]

use axum_test::TestServer;
use foodgram::application::services::RegisterUser;
use foodgram::infrastructure::cache::NullCache;
use foodgram::routes::router;
use foodgram::state::AppState;
use foodgram::utils::slug::SlugGenerator;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "https://foodgram.example";
pub const PASSWORD: &str = "password123";
pub const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(pool),
        Arc::new(NullCache::new()),
        TEST_SECRET.to_string(),
        BASE_URL.to_string(),
        SlugGenerator::default(),
    )
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Registers `username` with email `<username>@example.com` and [`PASSWORD`].
pub async fn create_user(state: &AppState, username: &str) -> i64 {
    state
        .user_service
        .register(RegisterUser {
            email: format!("{}@example.com", username),
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap()
        .id
}

/// Logs `username` in and returns a ready `Authorization` header value.
pub async fn auth_header(state: &AppState, username: &str) -> String {
    let token = state
        .auth_service
        .login(&format!("{}@example.com", username), PASSWORD)
        .await
        .unwrap();
    format!("Token {}", token)
}

pub async fn create_tag(pool: &PgPool, name: &str, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_recipe(
    pool: &PgPool,
    author_id: i64,
    name: &str,
    tags: &[i64],
    ingredients: &[(i64, i32)],
) -> i64 {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO recipes (author_id, name, text, image, cooking_time)
         VALUES ($1, $2, 'Cook it', $3, 15) RETURNING id",
    )
    .bind(author_id)
    .bind(name)
    .bind(PNG)
    .fetch_one(pool)
    .await
    .unwrap();

    for tag_id in tags {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
            .bind(id)
            .bind(tag_id)
            .execute(pool)
            .await
            .unwrap();
    }

    for (ingredient_id, amount) in ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(ingredient_id)
        .bind(amount)
        .execute(pool)
        .await
        .unwrap();
    }

    id
}

pub async fn add_to_cart(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}
