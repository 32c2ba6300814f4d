//! Shared application state injected into every handler.

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, CatalogService, FavoriteService, RecipeService, ShoppingCartService,
    ShortLinkService, SubscriptionService, UserService,
};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgCartRepository, PgFavoriteRepository, PgIngredientRepository, PgRecipeRepository,
    PgShortLinkRepository, PgSubscriptionRepository, PgTagRepository, PgTokenRepository,
    PgUserRepository,
};
use crate::utils::slug::SlugGenerator;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PgUserRepository, PgTokenRepository>>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub subscription_service: Arc<
        SubscriptionService<PgUserRepository, PgSubscriptionRepository, PgRecipeRepository>,
    >,
    pub catalog_service: Arc<CatalogService<PgTagRepository, PgIngredientRepository>>,
    pub recipe_service:
        Arc<RecipeService<PgRecipeRepository, PgTagRepository, PgIngredientRepository>>,
    pub favorite_service: Arc<FavoriteService<PgRecipeRepository, PgFavoriteRepository>>,
    pub shopping_cart_service: Arc<ShoppingCartService<PgRecipeRepository, PgCartRepository>>,
    pub short_link_service: Arc<ShortLinkService<PgRecipeRepository, PgShortLinkRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub pool: Arc<PgPool>,
    /// Origin used for pagination links, without a trailing slash.
    pub public_base_url: String,
    /// Scrape handle of the installed recorder; `/metrics` is 404 without it.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires every service to PostgreSQL repositories sharing one pool.
    pub fn new(
        pool: Arc<PgPool>,
        cache: Arc<dyn CacheService>,
        secret_key: String,
        public_base_url: String,
        slugs: SlugGenerator,
    ) -> Self {
        let public_base_url = public_base_url.trim_end_matches('/').to_string();

        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let tokens = Arc::new(PgTokenRepository::new(pool.clone()));
        let subscriptions = Arc::new(PgSubscriptionRepository::new(pool.clone()));
        let tags = Arc::new(PgTagRepository::new(pool.clone()));
        let ingredients = Arc::new(PgIngredientRepository::new(pool.clone()));
        let recipes = Arc::new(PgRecipeRepository::new(pool.clone()));
        let favorites = Arc::new(PgFavoriteRepository::new(pool.clone()));
        let cart = Arc::new(PgCartRepository::new(pool.clone()));
        let short_links = Arc::new(PgShortLinkRepository::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), tokens, secret_key)),
            user_service: Arc::new(UserService::new(users.clone())),
            subscription_service: Arc::new(SubscriptionService::new(
                users,
                subscriptions,
                recipes.clone(),
            )),
            catalog_service: Arc::new(CatalogService::new(tags.clone(), ingredients.clone())),
            recipe_service: Arc::new(RecipeService::new(recipes.clone(), tags, ingredients)),
            favorite_service: Arc::new(FavoriteService::new(recipes.clone(), favorites)),
            shopping_cart_service: Arc::new(ShoppingCartService::new(recipes.clone(), cart)),
            short_link_service: Arc::new(ShortLinkService::new(
                recipes,
                short_links,
                slugs,
                public_base_url.clone(),
            )),
            cache,
            pool,
            public_base_url,
            metrics: None,
        }
    }

    /// Exposes `handle` on `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
