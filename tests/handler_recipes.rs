#![cfg(feature = "postgres-tests")]

mod common;

use serde_json::{Value, json};
use sqlx::PgPool;

fn recipe_body(name: &str, tag: i64, ingredients: &[(i64, i32)]) -> Value {
    json!({
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({ "id": id, "amount": amount }))
            .collect::<Vec<_>>(),
        "tags": [tag],
        "image": common::PNG,
        "name": name,
        "text": "Mix and cook",
        "cooking_time": 30
    })
}

#[sqlx::test]
async fn test_create_recipe(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    common::create_user(&state, "ann").await;
    let tag = common::create_tag(&pool, "Lunch", "lunch").await;
    let salt = common::create_ingredient(&pool, "Salt", "g").await;
    let auth = common::auth_header(&state, "ann").await;
    let server = common::test_server(state);

    let response = server
        .post("/api/recipes")
        .add_header("Authorization", auth)
        .json(&recipe_body("Soup", tag, &[(salt, 5)]))
        .await;

    assert_eq!(response.status_code(), 201);
    let json = response.json::<Value>();
    assert_eq!(json["name"], "Soup");
    assert_eq!(json["author"]["username"], "ann");
    assert_eq!(json["tags"][0]["slug"], "lunch");
    assert_eq!(json["ingredients"][0]["name"], "Salt");
    assert_eq!(json["ingredients"][0]["measurement_unit"], "g");
    assert_eq!(json["ingredients"][0]["amount"], 5);
    assert_eq!(json["is_favorited"], false);
    assert_eq!(json["is_in_shopping_cart"], false);
}

#[sqlx::test]
async fn test_create_requires_auth(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let tag = common::create_tag(&pool, "Lunch", "lunch").await;
    let salt = common::create_ingredient(&pool, "Salt", "g").await;
    let server = common::test_server(state);

    let response = server
        .post("/api/recipes")
        .json(&recipe_body("Soup", tag, &[(salt, 5)]))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[sqlx::test]
async fn test_create_validation(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    common::create_user(&state, "ann").await;
    let tag = common::create_tag(&pool, "Lunch", "lunch").await;
    let salt = common::create_ingredient(&pool, "Salt", "g").await;
    let auth = common::auth_header(&state, "ann").await;
    let server = common::test_server(state);

    let duplicate = server
        .post("/api/recipes")
        .add_header("Authorization", auth.clone())
        .json(&recipe_body("Soup", tag, &[(salt, 5), (salt, 3)]))
        .await;
    assert_eq!(duplicate.status_code(), 400);

    let empty = server
        .post("/api/recipes")
        .add_header("Authorization", auth.clone())
        .json(&recipe_body("Soup", tag, &[]))
        .await;
    assert_eq!(empty.status_code(), 400);

    let unknown = server
        .post("/api/recipes")
        .add_header("Authorization", auth.clone())
        .json(&recipe_body("Soup", tag, &[(999_999, 1)]))
        .await;
    assert_eq!(unknown.status_code(), 404);

    let mut bad_image = recipe_body("Soup", tag, &[(salt, 5)]);
    bad_image["image"] = json!("https://example.com/soup.png");
    let response = server
        .post("/api/recipes")
        .add_header("Authorization", auth)
        .json(&bad_image)
        .await;
    assert_eq!(response.status_code(), 400);
}

#[sqlx::test]
async fn test_update_only_by_author(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let ann = common::create_user(&state, "ann").await;
    common::create_user(&state, "bob").await;
    let tag = common::create_tag(&pool, "Lunch", "lunch").await;
    let salt = common::create_ingredient(&pool, "Salt", "g").await;
    let id = common::create_recipe(&pool, ann, "Soup", &[tag], &[(salt, 5)]).await;
    let ann_auth = common::auth_header(&state, "ann").await;
    let bob_auth = common::auth_header(&state, "bob").await;
    let server = common::test_server(state);

    let forbidden = server
        .patch(&format!("/api/recipes/{}", id))
        .add_header("Authorization", bob_auth)
        .json(&recipe_body("Stolen", tag, &[(salt, 1)]))
        .await;
    assert_eq!(forbidden.status_code(), 403);

    let response = server
        .patch(&format!("/api/recipes/{}", id))
        .add_header("Authorization", ann_auth)
        .json(&recipe_body("Better soup", tag, &[(salt, 7)]))
        .await;
    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["name"], "Better soup");
    assert_eq!(json["ingredients"][0]["amount"], 7);
}

#[sqlx::test]
async fn test_delete_recipe(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let ann = common::create_user(&state, "ann").await;
    common::create_user(&state, "bob").await;
    let id = common::create_recipe(&pool, ann, "Soup", &[], &[]).await;
    let ann_auth = common::auth_header(&state, "ann").await;
    let bob_auth = common::auth_header(&state, "bob").await;
    let server = common::test_server(state);

    let forbidden = server
        .delete(&format!("/api/recipes/{}", id))
        .add_header("Authorization", bob_auth)
        .await;
    assert_eq!(forbidden.status_code(), 403);

    let response = server
        .delete(&format!("/api/recipes/{}", id))
        .add_header("Authorization", ann_auth)
        .await;
    assert_eq!(response.status_code(), 204);

    let gone = server.get(&format!("/api/recipes/{}", id)).await;
    assert_eq!(gone.status_code(), 404);
}

#[sqlx::test]
async fn test_list_filters_by_tag_and_author(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let ann = common::create_user(&state, "ann").await;
    let bob = common::create_user(&state, "bob").await;
    let lunch = common::create_tag(&pool, "Lunch", "lunch").await;
    let dinner = common::create_tag(&pool, "Dinner", "dinner").await;
    common::create_recipe(&pool, ann, "Soup", &[lunch], &[]).await;
    common::create_recipe(&pool, bob, "Steak", &[dinner], &[]).await;
    common::create_recipe(&pool, bob, "Toast", &[], &[]).await;
    let server = common::test_server(state);

    let json = server.get("/api/recipes").await.json::<Value>();
    assert_eq!(json["count"], 3);
    assert_eq!(json["results"][0]["name"], "Toast");

    let json = server
        .get("/api/recipes?tags=lunch&tags=dinner")
        .await
        .json::<Value>();
    assert_eq!(json["count"], 2);

    let json = server
        .get(&format!("/api/recipes?author={}", bob))
        .await
        .json::<Value>();
    assert_eq!(json["count"], 2);
}

#[sqlx::test]
async fn test_list_viewer_flags(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let ann = common::create_user(&state, "ann").await;
    let soup = common::create_recipe(&pool, ann, "Soup", &[], &[]).await;
    common::create_recipe(&pool, ann, "Toast", &[], &[]).await;
    let auth = common::auth_header(&state, "ann").await;
    let server = common::test_server(state);

    server
        .post(&format!("/api/recipes/{}/favorite", soup))
        .add_header("Authorization", auth.clone())
        .await;

    let json = server
        .get("/api/recipes?is_favorited=1")
        .add_header("Authorization", auth)
        .await
        .json::<Value>();
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["is_favorited"], true);

    // Anonymous viewers get the unfiltered list.
    let json = server
        .get("/api/recipes?is_favorited=1")
        .await
        .json::<Value>();
    assert_eq!(json["count"], 2);
}

#[sqlx::test]
async fn test_list_pagination_links(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let ann = common::create_user(&state, "ann").await;
    for name in ["A", "B", "C", "D", "E"] {
        common::create_recipe(&pool, ann, name, &[], &[]).await;
    }
    let server = common::test_server(state);

    let json = server
        .get("/api/recipes?limit=2&page=2")
        .await
        .json::<Value>();

    assert_eq!(json["count"], 5);
    assert_eq!(json["results"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["next"],
        "https://foodgram.example/api/recipes?limit=2&page=3"
    );
    assert_eq!(
        json["previous"],
        "https://foodgram.example/api/recipes?limit=2"
    );

    let bad = server.get("/api/recipes?limit=0").await;
    assert_eq!(bad.status_code(), 400);
}

#[sqlx::test]
async fn test_favorite_add_and_remove(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let ann = common::create_user(&state, "ann").await;
    let id = common::create_recipe(&pool, ann, "Soup", &[], &[]).await;
    let auth = common::auth_header(&state, "ann").await;
    let server = common::test_server(state);
    let path = format!("/api/recipes/{}/favorite", id);

    let response = server
        .post(&path)
        .add_header("Authorization", auth.clone())
        .await;
    assert_eq!(response.status_code(), 201);
    let json = response.json::<Value>();
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "Soup");
    assert_eq!(json["cooking_time"], 15);

    let again = server
        .post(&path)
        .add_header("Authorization", auth.clone())
        .await;
    assert_eq!(again.status_code(), 400);

    let removed = server
        .delete(&path)
        .add_header("Authorization", auth.clone())
        .await;
    assert_eq!(removed.status_code(), 204);

    let missing = server
        .delete(&path)
        .add_header("Authorization", auth.clone())
        .await;
    assert_eq!(missing.status_code(), 404);

    let unknown = server
        .post("/api/recipes/999999/favorite")
        .add_header("Authorization", auth)
        .await;
    assert_eq!(unknown.status_code(), 404);
}

#[sqlx::test]
async fn test_catalog_endpoints(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let tag = common::create_tag(&pool, "Lunch", "lunch").await;
    common::create_ingredient(&pool, "Sea salt", "g").await;
    common::create_ingredient(&pool, "Salt", "g").await;
    common::create_ingredient(&pool, "Sugar", "g").await;
    let server = common::test_server(state);

    let tags = server.get("/api/tags").await.json::<Value>();
    assert_eq!(tags[0]["slug"], "lunch");

    let one = server.get(&format!("/api/tags/{}", tag)).await;
    one.assert_status_ok();

    let found = server
        .get("/api/ingredients?name=SALT")
        .await
        .json::<Value>();
    let names: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Salt", "Sea salt"]);

    let missing = server.get("/api/ingredients/999999").await;
    assert_eq!(missing.status_code(), 404);
}
