//! Row types decoded from query results and their conversion into entities.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::entities::{
    Ingredient, IngredientLine, Profile, Recipe, RecipeCard, RecipeSummary, ShortLink, Tag, User,
};

#[derive(FromRow)]
pub(super) struct UserRow {
    id: i64,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    avatar: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            email: r.email,
            username: r.username,
            first_name: r.first_name,
            last_name: r.last_name,
            password_hash: r.password_hash,
            avatar: r.avatar,
            created_at: r.created_at,
        }
    }
}

#[derive(FromRow)]
pub(super) struct ProfileRow {
    id: i64,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    avatar: Option<String>,
    is_subscribed: bool,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Self {
            id: r.id,
            email: r.email,
            username: r.username,
            first_name: r.first_name,
            last_name: r.last_name,
            avatar: r.avatar,
            is_subscribed: r.is_subscribed,
        }
    }
}

#[derive(FromRow)]
pub(super) struct TagRow {
    id: i64,
    name: String,
    slug: String,
}

impl From<TagRow> for Tag {
    fn from(r: TagRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            slug: r.slug,
        }
    }
}

#[derive(FromRow)]
pub(super) struct IngredientRow {
    id: i64,
    name: String,
    measurement_unit: String,
}

impl From<IngredientRow> for Ingredient {
    fn from(r: IngredientRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            measurement_unit: r.measurement_unit,
        }
    }
}

#[derive(FromRow)]
pub(super) struct IngredientLineRow {
    ingredient_id: i64,
    name: String,
    measurement_unit: String,
    amount: i32,
}

impl From<IngredientLineRow> for IngredientLine {
    fn from(r: IngredientLineRow) -> Self {
        Self {
            ingredient_id: r.ingredient_id,
            name: r.name,
            measurement_unit: r.measurement_unit,
            amount: r.amount,
        }
    }
}

#[derive(FromRow)]
pub(super) struct RecipeRow {
    id: i64,
    author_id: i64,
    name: String,
    text: String,
    image: String,
    cooking_time: i32,
    pub_date: DateTime<Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(r: RecipeRow) -> Self {
        Self {
            id: r.id,
            author_id: r.author_id,
            name: r.name,
            text: r.text,
            image: r.image,
            cooking_time: r.cooking_time,
            pub_date: r.pub_date,
        }
    }
}

#[derive(FromRow)]
pub(super) struct RecipeSummaryRow {
    id: i64,
    name: String,
    image: String,
    cooking_time: i32,
}

impl From<RecipeSummaryRow> for RecipeSummary {
    fn from(r: RecipeSummaryRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            image: r.image,
            cooking_time: r.cooking_time,
        }
    }
}

/// A recipe joined with its author and the viewer flags.
#[derive(FromRow)]
pub(super) struct RecipeCardRow {
    #[sqlx(flatten)]
    recipe: RecipeRow,
    author_email: String,
    author_username: String,
    author_first_name: String,
    author_last_name: String,
    author_avatar: Option<String>,
    author_is_subscribed: bool,
    is_favorited: bool,
    is_in_shopping_cart: bool,
}

impl From<RecipeCardRow> for RecipeCard {
    fn from(r: RecipeCardRow) -> Self {
        let author = Profile {
            id: r.recipe.author_id,
            email: r.author_email,
            username: r.author_username,
            first_name: r.author_first_name,
            last_name: r.author_last_name,
            avatar: r.author_avatar,
            is_subscribed: r.author_is_subscribed,
        };

        Self {
            recipe: r.recipe.into(),
            author,
            is_favorited: r.is_favorited,
            is_in_shopping_cart: r.is_in_shopping_cart,
        }
    }
}

#[derive(FromRow)]
pub(super) struct ShortLinkRow {
    id: i64,
    recipe_id: i64,
    slug: String,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(r: ShortLinkRow) -> Self {
        Self {
            id: r.id,
            recipe_id: r.recipe_id,
            slug: r.slug,
            created_at: r.created_at,
        }
    }
}
