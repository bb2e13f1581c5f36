use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Tier, User},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>>;
    async fn increment_usage(&self, user_id: &str, questions: i64) -> AppResult<()>;
    async fn set_stripe_customer(&self, user_id: &str, customer_id: &str) -> AppResult<()>;
    async fn set_subscription(
        &self,
        user_id: &str,
        tier: Tier,
        customer_id: &str,
        subscription_id: &str,
        price_id: &str,
    ) -> AppResult<()>;
    async fn set_tier(&self, user_id: &str, tier: Tier, price_id: &str) -> AppResult<()>;
    async fn clear_subscription(&self, customer_id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "user_id": user_id }).await?;
        Ok(user)
    }

    async fn increment_usage(&self, user_id: &str, questions: i64) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$inc": { "monthly_chars_used": questions } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user_id
            )));
        }
        Ok(())
    }

    async fn set_stripe_customer(&self, user_id: &str, customer_id: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": { "stripe_customer_id": customer_id } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user_id
            )));
        }
        Ok(())
    }

    async fn set_subscription(
        &self,
        user_id: &str,
        tier: Tier,
        customer_id: &str,
        subscription_id: &str,
        price_id: &str,
    ) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": {
                    "tier": tier.as_str(),
                    "stripe_customer_id": customer_id,
                    "stripe_subscription_id": subscription_id,
                    "stripe_price_id": price_id,
                } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user_id
            )));
        }
        Ok(())
    }

    async fn set_tier(&self, user_id: &str, tier: Tier, price_id: &str) -> AppResult<()> {
        let result = self
            .collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": { "tier": tier.as_str(), "stripe_price_id": price_id } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user_id
            )));
        }
        Ok(())
    }

    async fn clear_subscription(&self, customer_id: &str) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "stripe_customer_id": customer_id },
                doc! {
                    "$set": { "tier": Tier::Free.as_str() },
                    "$unset": { "stripe_subscription_id": "" },
                },
            )
            .await?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on user_id field");

        Ok(())
    }
}
