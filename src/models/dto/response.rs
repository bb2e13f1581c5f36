use serde::Serialize;

use crate::models::domain::User;

#[derive(Debug, Serialize)]
pub struct AuthTokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationPendingResponse {
    pub message: String,
    pub email_confirmation_required: bool,
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub username: String,
    pub email: String,
    pub tier: String,
    pub monthly_limit: i64,
    pub questions_used: i64,
    pub questions_remaining: i64,
    pub email_verified: bool,
}

impl From<&User> for UsageResponse {
    fn from(user: &User) -> Self {
        UsageResponse {
            username: user.username.clone(),
            email: user.email.clone(),
            tier: user.tier.as_str().to_string(),
            monthly_limit: user.tier.monthly_question_limit(),
            questions_used: user.monthly_chars_used,
            questions_remaining: user.questions_remaining(),
            email_verified: user.email_verified,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PortalResponse {
    pub portal_url: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: String,
}
