#![cfg(feature = "postgres-tests")]

mod common;

use foodgram::application::services::short_link_service::SLUG_CONSTRAINT;
use foodgram::domain::repositories::ShortLinkRepository;
use foodgram::error::conflict_constraint;
use foodgram::infrastructure::persistence::PgShortLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

async fn recipe(pool: &PgPool, name: &str) -> i64 {
    let state = common::create_test_state(pool.clone());
    let author = common::create_user(&state, &format!("author-{}", name)).await;
    common::create_recipe(pool, author, name, &[], &[]).await
}

#[sqlx::test]
async fn test_insert_and_find(pool: PgPool) {
    let recipe_id = recipe(&pool, "soup").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert_if_absent(recipe_id, "s/AbCdEf")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(link.recipe_id, recipe_id);
    assert_eq!(link.slug, "s/AbCdEf");

    let by_recipe = repo.find_by_recipe(recipe_id).await.unwrap().unwrap();
    assert_eq!(by_recipe.slug, "s/AbCdEf");

    let by_slug = repo.find_by_slug("s/AbCdEf").await.unwrap().unwrap();
    assert_eq!(by_slug.recipe_id, recipe_id);
}

#[sqlx::test]
async fn test_second_insert_for_recipe_is_noop(pool: PgPool) {
    let recipe_id = recipe(&pool, "soup").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.insert_if_absent(recipe_id, "s/first").await.unwrap();
    let second = repo.insert_if_absent(recipe_id, "s/second").await.unwrap();

    assert!(second.is_none());
    assert_eq!(
        repo.find_by_recipe(recipe_id).await.unwrap().unwrap().slug,
        "s/first"
    );
    assert!(repo.find_by_slug("s/second").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_taken_slug_reports_slug_constraint(pool: PgPool) {
    let first = recipe(&pool, "soup").await;
    let second = recipe(&pool, "salad").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.insert_if_absent(first, "s/shared").await.unwrap();
    let err = repo.insert_if_absent(second, "s/shared").await.unwrap_err();

    assert_eq!(conflict_constraint(&err), Some(SLUG_CONSTRAINT));
}

#[sqlx::test]
async fn test_link_removed_with_recipe(pool: PgPool) {
    let recipe_id = recipe(&pool, "soup").await;
    let repo = PgShortLinkRepository::new(Arc::new(pool.clone()));

    repo.insert_if_absent(recipe_id, "s/gone").await.unwrap();
    sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(repo.find_by_slug("s/gone").await.unwrap().is_none());
}
