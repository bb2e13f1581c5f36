use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::tier::Tier;

/// Account record mirrored from the hosted identity provider, keyed by the
/// provider's opaque user id. Holds the subscription state and the monthly
/// question-usage accumulator (monthly reset is handled externally).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub monthly_chars_used: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_subscription_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_price_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(user_id: &str, username: &str, email: &str, email_verified: bool) -> Self {
        User {
            user_id: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            tier: Tier::Free,
            email_verified,
            monthly_chars_used: 0,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            stripe_price_id: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn questions_remaining(&self) -> i64 {
        (self.tier.monthly_question_limit() - self.monthly_chars_used).max(0)
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(user_id: &str) -> Self {
        User::new(
            user_id,
            "testuser",
            &format!("{}@example.com", user_id),
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("uid-1", "johndoe", "john@example.com", false);

        assert_eq!(user.tier, Tier::Free);
        assert_eq!(user.monthly_chars_used, 0);
        assert!(user.stripe_customer_id.is_none());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_questions_remaining_never_negative() {
        let mut user = User::test_user("uid-1");
        user.monthly_chars_used = 25;

        // Free tier allows 20/month, so an over-consumed counter clamps to zero
        assert_eq!(user.questions_remaining(), 0);

        user.tier = Tier::Pro;
        assert_eq!(user.questions_remaining(), 2_475);
    }
}
