use std::sync::Arc;

use crate::{
    auth::Claims,
    errors::AppResult,
    models::domain::{Tier, User},
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Looks up the account for a verified token, creating the record on
    /// first sight. Registration normally creates it, but tokens can predate
    /// the record when sign-up happened directly against the identity
    /// provider.
    pub async fn get_or_create_from_claims(&self, claims: &Claims) -> AppResult<User> {
        if let Some(user) = self.repository.find_by_id(&claims.sub).await? {
            return Ok(user);
        }

        log::info!("Creating missing user record for {}", claims.email);

        // Email prefix doubles as the initial username
        let username = claims.email.split('@').next().unwrap_or(&claims.email);
        let user = User::new(&claims.sub, username, &claims.email, claims.email_verified());
        self.repository.create(user).await
    }

    pub async fn create_user(
        &self,
        user_id: &str,
        username: &str,
        email: &str,
        email_verified: bool,
    ) -> AppResult<User> {
        let user = User::new(user_id, username, email, email_verified);
        self.repository.create(user).await
    }

    /// Best-effort usage accounting: a failed increment is logged but never
    /// fails the request that already produced the questions.
    pub async fn record_question_usage(&self, user: &User, questions: u32) {
        let new_total = user.monthly_chars_used + i64::from(questions);
        match self
            .repository
            .increment_usage(&user.user_id, i64::from(questions))
            .await
        {
            Ok(()) => log::info!(
                "Updated user {} question usage: {} -> {}",
                user.user_id,
                user.monthly_chars_used,
                new_total
            ),
            Err(e) => log::error!(
                "Failed to update question usage for user {}: {}",
                user.user_id,
                e
            ),
        }
    }

    pub async fn set_stripe_customer(&self, user_id: &str, customer_id: &str) -> AppResult<()> {
        self.repository
            .set_stripe_customer(user_id, customer_id)
            .await
    }

    pub async fn apply_subscription(
        &self,
        user_id: &str,
        tier: Tier,
        customer_id: &str,
        subscription_id: &str,
        price_id: &str,
    ) -> AppResult<()> {
        self.repository
            .set_subscription(user_id, tier, customer_id, subscription_id, price_id)
            .await
    }

    pub async fn change_tier(&self, user_id: &str, tier: Tier, price_id: &str) -> AppResult<()> {
        self.repository.set_tier(user_id, tier, price_id).await
    }

    pub async fn cancel_subscription(&self, customer_id: &str) -> AppResult<()> {
        self.repository.clear_subscription(customer_id).await
    }
}
