//! Recipe entity and its read models.

use chrono::{DateTime, Utc};

use super::catalog::Tag;
use super::user::Profile;

/// A published recipe as stored.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub pub_date: DateTime<Utc>,
}

impl Recipe {
    /// Returns true if `user_id` may edit or delete this recipe.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

/// An ingredient reference with the amount a recipe needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i64,
    pub amount: i32,
}

/// Input data for creating a recipe or replacing its contents.
///
/// On update, tags and ingredient lines are replaced wholesale.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// One ingredient row of a recipe, joined with the ingredient's name and unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientLine {
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Compact recipe view used in favorites, cart and subscription listings.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// A recipe with its author and the viewer-dependent flags.
#[derive(Debug, Clone)]
pub struct RecipeCard {
    pub recipe: Recipe,
    pub author: Profile,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// A [`RecipeCard`] completed with tags and ingredient lines.
#[derive(Debug, Clone)]
pub struct RecipeDetails {
    pub card: RecipeCard,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientLine>,
}

/// Filters for recipe listings.
///
/// `favorited_by` and `in_cart_of` hold the viewer's id when the matching
/// query flag is set; they are left empty for anonymous viewers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub author_id: Option<i64>,
    pub tag_slugs: Vec<String>,
    pub favorited_by: Option<i64>,
    pub in_cart_of: Option<i64>,
}
