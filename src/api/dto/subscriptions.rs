//! DTOs for subscriptions.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use super::recipes::RecipeSummaryResponse;
use super::users::ProfileResponse;
use crate::domain::entities::AuthorWithRecipes;

/// `recipes_limit` caps the recipe preview of each author.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecipesLimitParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub recipes_limit: Option<u32>,
}

impl RecipesLimitParams {
    pub fn get(&self) -> Option<i64> {
        self.recipes_limit.map(i64::from)
    }
}

/// An author profile with a preview of their newest recipes.
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: i64,
}

impl From<AuthorWithRecipes> for AuthorResponse {
    fn from(author: AuthorWithRecipes) -> Self {
        Self {
            profile: author.profile.into(),
            recipes: author.recipes.into_iter().map(Into::into).collect(),
            recipes_count: author.recipes_count,
        }
    }
}
