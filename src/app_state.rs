use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoUserRepository, UserRepository},
    services::{BillingService, GeneratorService, IdentityService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub generator_service: Arc<GeneratorService>,
    pub billing_service: Arc<BillingService>,
    pub identity_service: Arc<IdentityService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db, &config.users_collection));
        user_repository.ensure_indexes().await?;
        let user_service = Arc::new(UserService::new(user_repository));

        let generator_service = Arc::new(GeneratorService::new(&config));
        let billing_service = Arc::new(BillingService::new(&config));
        let identity_service = Arc::new(IdentityService::new(&config));

        Ok(Self {
            user_service,
            generator_service,
            billing_service,
            identity_service,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
