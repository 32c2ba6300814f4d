//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence concerns. Creation
//! inputs use separate `New*` structs, and read models that combine several
//! tables (a recipe with its author and viewer flags) get their own types.
//!
//! # Entity Types
//!
//! - [`User`] / [`Profile`] - Accounts and their public view
//! - [`Tag`] / [`Ingredient`] - Reference data
//! - [`Recipe`] / [`RecipeCard`] / [`RecipeDetails`] - Recipes and read models
//! - [`IngredientLine`] - An ingredient with its amount inside a recipe
//! - [`ShortLink`] - A recipe slug for shareable URLs

pub mod catalog;
pub mod recipe;
pub mod short_link;
pub mod user;

pub use catalog::{Ingredient, NewIngredient, NewTag, Tag};
pub use recipe::{
    IngredientAmount, IngredientLine, NewRecipe, Recipe, RecipeCard, RecipeDetails, RecipeFilter,
    RecipeSummary,
};
pub use short_link::ShortLink;
pub use user::{AuthorWithRecipes, NewUser, Profile, User};
