//! Business logic services for the application layer.

pub mod auth_service;
pub mod catalog_service;
pub mod favorite_service;
pub mod recipe_service;
pub mod shopping_cart_service;
pub mod short_link_service;
pub mod subscription_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
pub use favorite_service::FavoriteService;
pub use recipe_service::RecipeService;
pub use shopping_cart_service::ShoppingCartService;
pub use short_link_service::ShortLinkService;
pub use subscription_service::SubscriptionService;
pub use user_service::{RegisterUser, UserService};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use crate::domain::entities::{IngredientLine, Profile, Recipe, RecipeCard, User};

    pub fn user(id: i64) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            username: format!("user{}", id),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            password_hash: "00$00".to_string(),
            avatar: None,
            created_at: Utc::now(),
        }
    }

    pub fn recipe(id: i64, author_id: i64) -> Recipe {
        Recipe {
            id,
            author_id,
            name: format!("Recipe {}", id),
            text: "Cook it".to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
            cooking_time: 15,
            pub_date: Utc::now(),
        }
    }

    pub fn card(id: i64, author_id: i64) -> RecipeCard {
        RecipeCard {
            recipe: recipe(id, author_id),
            author: Profile::from_user(&user(author_id), false),
            is_favorited: false,
            is_in_shopping_cart: false,
        }
    }

    pub fn line(ingredient_id: i64, name: &str, unit: &str, amount: i32) -> IngredientLine {
        IngredientLine {
            ingredient_id,
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }
}
