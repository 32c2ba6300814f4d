//! PostgreSQL implementation of recipe repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

use super::rows::{IngredientLineRow, RecipeCardRow, RecipeRow, RecipeSummaryRow, TagRow};
use crate::domain::entities::{
    IngredientLine, NewRecipe, Recipe, RecipeCard, RecipeFilter, RecipeSummary, Tag,
};
use crate::domain::repositories::RecipeRepository;
use crate::error::AppError;

/// Card columns. `$1` is always the viewer id (NULL for anonymous viewers).
const CARD_SELECT: &str = r#"
    SELECT r.id, r.author_id, r.name, r.text, r.image, r.cooking_time, r.pub_date,
           u.email AS author_email,
           u.username AS author_username,
           u.first_name AS author_first_name,
           u.last_name AS author_last_name,
           u.avatar AS author_avatar,
           EXISTS (
               SELECT 1 FROM follows f WHERE f.user_id = $1::bigint AND f.author_id = r.author_id
           ) AS author_is_subscribed,
           EXISTS (
               SELECT 1 FROM favorites fv WHERE fv.user_id = $1::bigint AND fv.recipe_id = r.id
           ) AS is_favorited,
           EXISTS (
               SELECT 1 FROM shopping_cart c WHERE c.user_id = $1::bigint AND c.recipe_id = r.id
           ) AS is_in_shopping_cart
    FROM recipes r
    JOIN users u ON u.id = r.author_id
"#;

/// Listing filter over `$2..$5`: author, tag slugs (any), favorited by, in cart of.
const FILTER_CLAUSE: &str = r#"
    WHERE ($2::bigint IS NULL OR r.author_id = $2)
      AND (cardinality($3::text[]) = 0 OR EXISTS (
            SELECT 1 FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = r.id AND t.slug = ANY($3)
          ))
      AND ($4::bigint IS NULL OR EXISTS (
            SELECT 1 FROM favorites fv2 WHERE fv2.recipe_id = r.id AND fv2.user_id = $4
          ))
      AND ($5::bigint IS NULL OR EXISTS (
            SELECT 1 FROM shopping_cart c2 WHERE c2.recipe_id = r.id AND c2.user_id = $5
          ))
"#;

/// PostgreSQL repository for recipes.
///
/// Creates and updates run in a transaction together with the tag and
/// ingredient link rows.
pub struct PgRecipeRepository {
    pool: Arc<PgPool>,
}

impl PgRecipeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn insert_links(
        tx: &mut Transaction<'_, Postgres>,
        recipe_id: i64,
        recipe: &NewRecipe,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO recipe_tags (recipe_id, tag_id)
            SELECT $1, tag_id FROM UNNEST($2::bigint[]) AS tag_id
            "#,
        )
        .bind(recipe_id)
        .bind(&recipe.tags)
        .execute(&mut **tx)
        .await?;

        let (ingredient_ids, amounts): (Vec<i64>, Vec<i32>) = recipe
            .ingredients
            .iter()
            .map(|line| (line.ingredient_id, line.amount))
            .unzip();

        sqlx::query(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
            SELECT $1, ingredient_id, amount
            FROM UNNEST($2::bigint[], $3::integer[]) AS lines (ingredient_id, amount)
            "#,
        )
        .bind(recipe_id)
        .bind(&ingredient_ids)
        .bind(&amounts)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, author_id: i64, recipe: NewRecipe) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO recipes (author_id, name, text, image, cooking_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(author_id)
        .bind(&recipe.name)
        .bind(&recipe.text)
        .bind(&recipe.image)
        .bind(recipe.cooking_time)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_links(&mut tx, id, &recipe).await?;
        tx.commit().await?;

        Ok(id)
    }

    async fn update(&self, id: i64, recipe: NewRecipe) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE recipes
            SET name = $1, text = $2, image = $3, cooking_time = $4
            WHERE id = $5
            "#,
        )
        .bind(&recipe.name)
        .bind(&recipe.text)
        .bind(&recipe.image)
        .bind(recipe.cooking_time)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insert_links(&mut tx, id, &recipe).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, author_id, name, text, image, cooking_time, pub_date
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM recipes WHERE id = $1)")
            .bind(id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }

    async fn find_card(
        &self,
        id: i64,
        viewer: Option<i64>,
    ) -> Result<Option<RecipeCard>, AppError> {
        let sql = format!("{CARD_SELECT} WHERE r.id = $2");

        let row = sqlx::query_as::<_, RecipeCardRow>(&sql)
            .bind(viewer)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_cards(
        &self,
        filter: RecipeFilter,
        viewer: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecipeCard>, AppError> {
        let sql = format!(
            "{CARD_SELECT} {FILTER_CLAUSE} ORDER BY r.pub_date DESC, r.id DESC LIMIT $6 OFFSET $7"
        );

        let rows = sqlx::query_as::<_, RecipeCardRow>(&sql)
            .bind(viewer)
            .bind(filter.author_id)
            .bind(&filter.tag_slugs)
            .bind(filter.favorited_by)
            .bind(filter.in_cart_of)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: RecipeFilter) -> Result<i64, AppError> {
        // $1 carries no viewer here; it is typed explicitly so placeholders match list_cards.
        let sql =
            format!("SELECT COUNT(*) FROM recipes r {FILTER_CLAUSE} AND $1::bigint IS NULL");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(None::<i64>)
            .bind(filter.author_id)
            .bind(&filter.tag_slugs)
            .bind(filter.favorited_by)
            .bind(filter.in_cart_of)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn tags_of(&self, recipe_id: i64) -> Result<Vec<Tag>, AppError> {
        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT t.id, t.name, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(recipe_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ingredient_lines(&self, recipe_id: i64) -> Result<Vec<IngredientLine>, AppError> {
        let rows = sqlx::query_as::<_, IngredientLineRow>(
            r#"
            SELECT i.id AS ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.id
            "#,
        )
        .bind(recipe_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn summaries_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeSummary>, AppError> {
        let rows = sqlx::query_as::<_, RecipeSummaryRow>(
            r#"
            SELECT id, name, image, cooking_time
            FROM recipes
            WHERE author_id = $1
            ORDER BY pub_date DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
