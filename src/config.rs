use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub users_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub base_url: String,
    pub identity_url: String,
    pub identity_api_key: SecretString,
    pub identity_jwt_secret: SecretString,
    pub ai_api_key: SecretString,
    pub ai_base_url: String,
    pub ai_model: String,
    pub ai_max_tokens: u32,
    pub ai_temperature: f32,
    pub stripe_secret_key: SecretString,
    pub stripe_price_id_pro: String,
    pub stripe_price_id_business: String,
    pub stripe_webhook_secret: SecretString,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "testgenius-local".to_string()),
            users_collection: env::var("USERS_COLLECTION").unwrap_or_else(|_| "users".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
            identity_url: env::var("IDENTITY_URL")
                .unwrap_or_else(|_| "http://localhost:9999".to_string()),
            identity_api_key: SecretString::from(
                env::var("IDENTITY_API_KEY").unwrap_or_else(|_| "identity_api_key".to_string()),
            ),
            identity_jwt_secret: SecretString::from(
                env::var("IDENTITY_JWT_SECRET")
                    .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string()),
            ),
            ai_api_key: SecretString::from(
                env::var("DEEPSEEK_API_KEY").unwrap_or_else(|_| "ai_api_key".to_string()),
            ),
            ai_base_url: env::var("AI_BASE_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com/v1".to_string()),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
            ai_max_tokens: env::var("AI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            ai_temperature: env::var("AI_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.7),
            stripe_secret_key: SecretString::from(
                env::var("STRIPE_SECRET_KEY").unwrap_or_else(|_| "stripe_secret_key".to_string()),
            ),
            stripe_price_id_pro: env::var("STRIPE_PRICE_ID_PRO")
                .unwrap_or_else(|_| "price_pro".to_string()),
            stripe_price_id_business: env::var("STRIPE_PRICE_ID_BUSINESS")
                .unwrap_or_else(|_| "price_business".to_string()),
            stripe_webhook_secret: SecretString::from(
                env::var("STRIPE_WEBHOOK_SECRET")
                    .unwrap_or_else(|_| "stripe_webhook_secret".to_string()),
            ),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.identity_jwt_secret.expose_secret();

        if jwt_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: IDENTITY_JWT_SECRET is using default value! Set IDENTITY_JWT_SECRET environment variable to the identity provider's signing secret."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: IDENTITY_JWT_SECRET is too short ({}). Must be at least 32 characters.",
                jwt_secret.len()
            );
        }

        if self.ai_api_key.expose_secret() == "ai_api_key" {
            panic!("FATAL: DEEPSEEK_API_KEY is using default value! Set DEEPSEEK_API_KEY environment variable.");
        }

        if self.stripe_secret_key.expose_secret() == "stripe_secret_key" {
            panic!("FATAL: STRIPE_SECRET_KEY is using default value! Set STRIPE_SECRET_KEY environment variable.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "testgenius-test".to_string(),
            users_collection: "users".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            base_url: "http://localhost:8080".to_string(),
            identity_url: "http://localhost:9999".to_string(),
            identity_api_key: SecretString::from("test_identity_key".to_string()),
            identity_jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            ai_api_key: SecretString::from("test_ai_key".to_string()),
            ai_base_url: "https://api.deepseek.com/v1".to_string(),
            ai_model: "deepseek-chat".to_string(),
            ai_max_tokens: 8000,
            ai_temperature: 0.7,
            stripe_secret_key: SecretString::from("sk_test_key".to_string()),
            stripe_price_id_pro: "price_test_pro".to_string(),
            stripe_price_id_business: "price_test_business".to_string(),
            stripe_webhook_secret: SecretString::from("whsec_test".to_string()),
        }
    }
}
