//! Following authors and listing followed authors with their recipes.

use std::sync::Arc;

use crate::domain::entities::{AuthorWithRecipes, Profile};
use crate::domain::repositories::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;
use tracing::info;

pub struct SubscriptionService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    users: Arc<U>,
    subscriptions: Arc<S>,
    recipes: Arc<R>,
}

impl<U, S, R> SubscriptionService<U, S, R>
where
    U: UserRepository,
    S: SubscriptionRepository,
    R: RecipeRepository,
{
    pub fn new(users: Arc<U>, subscriptions: Arc<S>, recipes: Arc<R>) -> Self {
        Self {
            users,
            subscriptions,
            recipes,
        }
    }

    /// Subscribes `user_id` to `author_id` and returns the author with a
    /// preview of at most `recipes_limit` newest recipes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on self-subscription or if already subscribed.
    /// Returns [`AppError::NotFound`] if the author does not exist.
    pub async fn subscribe(
        &self,
        user_id: i64,
        author_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<AuthorWithRecipes, AppError> {
        if user_id == author_id {
            return Err(AppError::bad_request(
                "You cannot subscribe to yourself",
                json!({ "author_id": author_id }),
            ));
        }

        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": author_id })))?;

        if !self.subscriptions.subscribe(user_id, author_id).await? {
            return Err(AppError::bad_request(
                "Already subscribed",
                json!({ "author_id": author_id }),
            ));
        }

        info!(user_id, author_id, "Subscribed");
        self.with_recipes(Profile::from_user(&author, true), recipes_limit)
            .await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist or is not followed.
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> Result<(), AppError> {
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(AppError::not_found(
                "User not found",
                json!({ "id": author_id }),
            ));
        }

        if !self.subscriptions.unsubscribe(user_id, author_id).await? {
            return Err(AppError::not_found(
                "Subscription not found",
                json!({ "author_id": author_id }),
            ));
        }

        info!(user_id, author_id, "Unsubscribed");
        Ok(())
    }

    /// Returns one page of followed authors and their total count.
    pub async fn list(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
        recipes_limit: Option<i64>,
    ) -> Result<(Vec<AuthorWithRecipes>, i64), AppError> {
        let profiles = self
            .subscriptions
            .list_authors(user_id, limit, offset)
            .await?;
        let count = self.subscriptions.count_authors(user_id).await?;

        let mut authors = Vec::with_capacity(profiles.len());
        for profile in profiles {
            authors.push(self.with_recipes(profile, recipes_limit).await?);
        }

        Ok((authors, count))
    }

    async fn with_recipes(
        &self,
        profile: Profile,
        recipes_limit: Option<i64>,
    ) -> Result<AuthorWithRecipes, AppError> {
        let recipes = self
            .recipes
            .summaries_by_author(profile.id, recipes_limit)
            .await?;
        let recipes_count = self.recipes.count_by_author(profile.id).await?;

        Ok(AuthorWithRecipes {
            profile,
            recipes,
            recipes_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support;
    use crate::domain::entities::RecipeSummary;
    use crate::domain::repositories::{
        MockRecipeRepository, MockSubscriptionRepository, MockUserRepository,
    };

    type Service =
        SubscriptionService<MockUserRepository, MockSubscriptionRepository, MockRecipeRepository>;

    fn service(
        users: MockUserRepository,
        subscriptions: MockSubscriptionRepository,
        recipes: MockRecipeRepository,
    ) -> Service {
        SubscriptionService::new(Arc::new(users), Arc::new(subscriptions), Arc::new(recipes))
    }

    fn recipes_with(count: i64) -> MockRecipeRepository {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_summaries_by_author()
            .returning(|author_id, limit| {
                let summaries: Vec<RecipeSummary> = (1..=3)
                    .map(|id| RecipeSummary::from(&test_support::recipe(id, author_id)))
                    .take(limit.unwrap_or(i64::MAX) as usize)
                    .collect();
                Ok(summaries)
            });
        recipes
            .expect_count_by_author()
            .returning(move |_| Ok(count));
        recipes
    }

    #[tokio::test]
    async fn test_subscribe_self_is_rejected() {
        let result = service(
            MockUserRepository::new(),
            MockSubscriptionRepository::new(),
            MockRecipeRepository::new(),
        )
        .subscribe(4, 4, None)
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_subscribe_unknown_author() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let result = service(
            users,
            MockSubscriptionRepository::new(),
            MockRecipeRepository::new(),
        )
        .subscribe(1, 2, None)
        .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_subscribe_twice_is_rejected() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_support::user(id))));
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_subscribe().returning(|_, _| Ok(false));

        let result = service(users, subscriptions, MockRecipeRepository::new())
            .subscribe(1, 2, None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_subscribe_returns_author_with_limited_recipes() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_support::user(id))));
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions
            .expect_subscribe()
            .withf(|user_id, author_id| *user_id == 1 && *author_id == 2)
            .returning(|_, _| Ok(true));

        let author = service(users, subscriptions, recipes_with(3))
            .subscribe(1, 2, Some(2))
            .await
            .unwrap();

        assert!(author.profile.is_subscribed);
        assert_eq!(author.profile.id, 2);
        assert_eq!(author.recipes.len(), 2);
        assert_eq!(author.recipes_count, 3);
    }

    #[tokio::test]
    async fn test_unsubscribe_when_not_subscribed() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_support::user(id))));
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_unsubscribe().returning(|_, _| Ok(false));

        let result = service(users, subscriptions, MockRecipeRepository::new())
            .unsubscribe(1, 2)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_builds_each_author() {
        let mut subscriptions = MockSubscriptionRepository::new();
        subscriptions.expect_list_authors().returning(|_, _, _| {
            Ok(vec![
                Profile::from_user(&test_support::user(2), true),
                Profile::from_user(&test_support::user(3), true),
            ])
        });
        subscriptions.expect_count_authors().returning(|_| Ok(2));

        let (authors, count) = service(MockUserRepository::new(), subscriptions, recipes_with(3))
            .list(1, 6, 0, None)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[1].recipes.len(), 3);
    }
}
