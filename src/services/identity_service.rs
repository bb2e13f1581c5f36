use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Outcome of a sign-up call. The provider withholds the session until the
/// email address is confirmed, so the token is optional.
#[derive(Debug, Deserialize)]
pub struct SignUpOutcome {
    pub user_id: String,
    pub email_verified: bool,
    pub access_token: Option<String>,
}

/// Thin client for the hosted identity provider's REST API (GoTrue-style).
/// Credential checks and session issuance stay with the provider; this
/// service only relays them.
pub struct IdentityService {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl IdentityService {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.identity_url.trim_end_matches('/').to_string(),
            api_key: config.identity_api_key.clone(),
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AppResult<SignUpOutcome> {
        let response = self
            .http
            .post(format!("{}/auth/v1/signup", self.base_url))
            .header("apikey", self.api_key.expose_secret())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| {
                AppError::InternalError(format!("Identity provider request failed: {}", e))
            })?;

        let status = response.status();
        let body: serde_json::Value = response.json().await.map_err(|e| {
            AppError::InternalError(format!("Failed to parse identity provider response: {}", e))
        })?;

        if !status.is_success() {
            let message = provider_error_message(&body);
            return Err(AppError::ValidationError(format!(
                "Registration failed: {}",
                message
            )));
        }

        // The user object is nested under "user" when a session is returned,
        // or is the top-level object when confirmation is still pending.
        let user = body.get("user").unwrap_or(&body);
        let user_id = user
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::InternalError("Identity provider returned no user id".to_string())
            })?
            .to_string();

        let email_verified = user
            .get("email_confirmed_at")
            .is_some_and(|v| !v.is_null());

        let access_token = body
            .get("access_token")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Ok(SignUpOutcome {
            user_id,
            email_verified,
            access_token,
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<String> {
        let response = self
            .http
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url
            ))
            .header("apikey", self.api_key.expose_secret())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| {
                AppError::InternalError(format!("Identity provider request failed: {}", e))
            })?;

        let status = response.status();
        let body: serde_json::Value = response.json().await.map_err(|e| {
            AppError::InternalError(format!("Failed to parse identity provider response: {}", e))
        })?;

        if !status.is_success() {
            log::warn!("Sign-in rejected by identity provider: {}", status);
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        body.get("access_token")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Unauthorized("Identity provider returned no access token".to_string())
            })
    }
}

fn provider_error_message(body: &serde_json::Value) -> String {
    body.get("msg")
        .or_else(|| body.get("error_description"))
        .or_else(|| body.get("message"))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown provider error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_message_prefers_msg_field() {
        let body = serde_json::json!({ "msg": "User already registered" });
        assert_eq!(provider_error_message(&body), "User already registered");

        let body = serde_json::json!({ "error_description": "Bad password" });
        assert_eq!(provider_error_message(&body), "Bad password");

        let body = serde_json::json!({ "something_else": true });
        assert_eq!(provider_error_message(&body), "unknown provider error");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let mut config = Config::test_config();
        config.identity_url = "http://localhost:9999/".to_string();

        let service = IdentityService::new(&config);
        assert_eq!(service.base_url, "http://localhost:9999");
    }
}
