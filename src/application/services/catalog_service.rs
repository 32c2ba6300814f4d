//! Read access to tags and ingredients, plus bulk import for the admin CLI.

use std::sync::Arc;

use crate::domain::entities::{Ingredient, NewIngredient, NewTag, Tag};
use crate::domain::repositories::{IngredientRepository, TagRepository};
use crate::error::{AppError, conflict_constraint};
use serde_json::json;
use tracing::{debug, info};

pub struct CatalogService<T: TagRepository, I: IngredientRepository> {
    tags: Arc<T>,
    ingredients: Arc<I>,
}

impl<T: TagRepository, I: IngredientRepository> CatalogService<T, I> {
    pub fn new(tags: Arc<T>, ingredients: Arc<I>) -> Self {
        Self { tags, ingredients }
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        self.tags.list().await
    }

    pub async fn get_tag(&self, id: i64) -> Result<Tag, AppError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "id": id })))
    }

    /// Lists ingredients, keeping those whose name contains `name` when given.
    ///
    /// A blank search term lists everything.
    pub async fn search_ingredients(&self, name: Option<&str>) -> Result<Vec<Ingredient>, AppError> {
        let term = name
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);
        self.ingredients.search(term).await
    }

    pub async fn get_ingredient(&self, id: i64) -> Result<Ingredient, AppError> {
        self.ingredients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Ingredient not found", json!({ "id": id })))
    }

    /// Imports ingredients, skipping name+unit pairs that already exist.
    ///
    /// Returns the number of new rows.
    pub async fn import_ingredients(
        &self,
        ingredients: Vec<NewIngredient>,
    ) -> Result<u64, AppError> {
        let submitted = ingredients.len();
        let inserted = self.ingredients.create_many(ingredients).await?;
        info!(submitted, inserted, "Imported ingredients");
        Ok(inserted)
    }

    /// Imports tags one by one, skipping those whose name or slug is taken.
    ///
    /// Returns the number of new tags.
    pub async fn import_tags(&self, tags: Vec<NewTag>) -> Result<u64, AppError> {
        let mut inserted = 0;

        for tag in tags {
            let slug = tag.slug.clone();
            match self.tags.create(tag).await {
                Ok(_) => inserted += 1,
                Err(e) if conflict_constraint(&e).is_some() => {
                    debug!(slug = %slug, "Tag already exists, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        info!(inserted, "Imported tags");
        Ok(inserted)
    }
}
