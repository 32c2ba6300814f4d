//! DTOs for recipes, their filters and the short recipe form.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use super::catalog::TagResponse;
use super::pagination::PaginationParams;
use super::users::ProfileResponse;
use crate::domain::entities::{
    IngredientAmount, IngredientLine, NewRecipe, RecipeDetails, RecipeFilter, RecipeSummary,
};
use crate::error::AppError;

/// Smallest and largest accepted ingredient amount and cooking time.
pub const MIN_VALUE: i32 = 1;
pub const MAX_VALUE: i32 = 32_000;

/// Request body for creating or replacing a recipe.
#[derive(Debug, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(length(min = 1), nested)]
    pub ingredients: Vec<IngredientAmountRequest>,

    #[validate(length(min = 1))]
    pub tags: Vec<i64>,

    #[validate(length(min = 1))]
    pub image: String,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1))]
    pub text: String,

    #[validate(range(min = MIN_VALUE, max = MAX_VALUE))]
    pub cooking_time: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct IngredientAmountRequest {
    pub id: i64,

    #[validate(range(min = MIN_VALUE, max = MAX_VALUE))]
    pub amount: i32,
}

impl From<RecipeRequest> for NewRecipe {
    fn from(req: RecipeRequest) -> Self {
        Self {
            name: req.name,
            text: req.text,
            image: req.image,
            cooking_time: req.cooking_time,
            tags: req.tags,
            ingredients: req
                .ingredients
                .into_iter()
                .map(|i| IngredientAmount {
                    ingredient_id: i.id,
                    amount: i.amount,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientLineResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<IngredientLine> for IngredientLineResponse {
    fn from(line: IngredientLine) -> Self {
        Self {
            id: line.ingredient_id,
            name: line.name,
            measurement_unit: line.measurement_unit,
            amount: line.amount,
        }
    }
}

/// Full recipe representation.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: ProfileResponse,
    pub ingredients: Vec<IngredientLineResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl From<RecipeDetails> for RecipeResponse {
    fn from(details: RecipeDetails) -> Self {
        let RecipeDetails {
            card,
            tags,
            ingredients,
        } = details;

        Self {
            id: card.recipe.id,
            tags: tags.into_iter().map(Into::into).collect(),
            author: card.author.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            is_favorited: card.is_favorited,
            is_in_shopping_cart: card.is_in_shopping_cart,
            name: card.recipe.name,
            image: card.recipe.image,
            text: card.recipe.text,
            cooking_time: card.recipe.cooking_time,
        }
    }
}

/// `{id, name, image, cooking_time}` used by favorites, cart and subscriptions.
#[derive(Debug, Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(s: RecipeSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            image: s.image,
            cooking_time: s.cooking_time,
        }
    }
}

/// Query string of `GET /api/recipes`.
///
/// Parsed by hand because `tags` may repeat.
#[derive(Debug, Default, PartialEq)]
pub struct RecipeListQuery {
    pub pagination: PaginationParams,
    pub author: Option<i64>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeListQuery {
    /// Parses a raw query string. Unknown parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a numeric parameter is not a number.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let mut query = Self::default();

        let Some(raw) = raw else {
            return Ok(query);
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "page" => query.pagination.page = Some(parse_number("page", &value)?),
                "limit" => query.pagination.limit = Some(parse_number("limit", &value)?),
                "author" => query.author = Some(parse_number("author", &value)?),
                "tags" if !value.is_empty() => query.tags.push(value.into_owned()),
                "is_favorited" => query.is_favorited = is_truthy(&value),
                "is_in_shopping_cart" => query.is_in_shopping_cart = is_truthy(&value),
                _ => {}
            }
        }

        Ok(query)
    }

    /// Builds the repository filter. Viewer-relative flags need a viewer.
    pub fn filter(&self, viewer: Option<i64>) -> RecipeFilter {
        RecipeFilter {
            author_id: self.author,
            tag_slugs: self.tags.clone(),
            favorited_by: viewer.filter(|_| self.is_favorited),
            in_cart_of: viewer.filter(|_| self.is_in_shopping_cart),
        }
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value.parse().map_err(|_| {
        AppError::bad_request(
            format!("Invalid value for '{}'", name),
            json!({ "parameter": name, "value": value }),
        )
    })
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecipeRequest {
        serde_json::from_value(json!({
            "ingredients": [{ "id": 1, "amount": 10 }],
            "tags": [1],
            "image": "data:image/png;base64,AAAA",
            "name": "Pancakes",
            "text": "Mix and fry",
            "cooking_time": 20
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_empty_ingredients_and_tags_are_rejected() {
        let mut req = request();
        req.ingredients.clear();
        assert!(req.validate().is_err());

        let mut req = request();
        req.tags.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_amount_and_cooking_time_bounds() {
        let mut req = request();
        req.ingredients[0].amount = 0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.ingredients[0].amount = MAX_VALUE + 1;
        assert!(req.validate().is_err());

        let mut req = request();
        req.cooking_time = 0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.cooking_time = MAX_VALUE;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_line_is_reported_under_ingredients() {
        let mut req = request();
        req.ingredients.push(IngredientAmountRequest { id: 2, amount: 0 });

        let errors = req.validate().unwrap_err();
        assert!(errors.errors().contains_key("ingredients"));

        let info = AppError::from(errors).to_error_info();
        assert_eq!(info.code, "validation_error");
        assert!(info.details.get("ingredients").is_some());
    }

    #[test]
    fn test_name_length_limit() {
        let mut req = request();
        req.name = "x".repeat(201);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_into_new_recipe() {
        let recipe = NewRecipe::from(request());
        assert_eq!(
            recipe.ingredients,
            vec![IngredientAmount {
                ingredient_id: 1,
                amount: 10
            }]
        );
        assert_eq!(recipe.tags, vec![1]);
    }

    #[test]
    fn test_parse_empty_query() {
        assert_eq!(
            RecipeListQuery::parse(None).unwrap(),
            RecipeListQuery::default()
        );
    }

    #[test]
    fn test_parse_repeated_tags_and_flags() {
        let query = RecipeListQuery::parse(Some(
            "tags=breakfast&tags=lunch&author=3&is_favorited=1&page=2&limit=10",
        ))
        .unwrap();

        assert_eq!(query.tags, vec!["breakfast", "lunch"]);
        assert_eq!(query.author, Some(3));
        assert!(query.is_favorited);
        assert!(!query.is_in_shopping_cart);
        assert_eq!(query.pagination.page, Some(2));
        assert_eq!(query.pagination.limit, Some(10));
    }

    #[test]
    fn test_parse_rejects_non_numeric_author() {
        assert!(RecipeListQuery::parse(Some("author=abc")).is_err());
    }

    #[test]
    fn test_viewer_flags_ignored_for_anonymous() {
        let query =
            RecipeListQuery::parse(Some("is_favorited=1&is_in_shopping_cart=true")).unwrap();

        let anonymous = query.filter(None);
        assert!(anonymous.favorited_by.is_none());
        assert!(anonymous.in_cart_of.is_none());

        let signed_in = query.filter(Some(5));
        assert_eq!(signed_in.favorited_by, Some(5));
        assert_eq!(signed_in.in_cart_of, Some(5));
    }

    #[test]
    fn test_zero_flag_is_false() {
        let query = RecipeListQuery::parse(Some("is_favorited=0")).unwrap();
        assert!(query.filter(Some(5)).favorited_by.is_none());
    }
}
