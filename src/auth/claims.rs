use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by the hosted identity provider's access tokens. The
/// provider issues the tokens; this service only verifies and reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // provider's opaque user id
    pub email: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    #[serde(default)]
    pub iat: usize, // Issued at (as UTC timestamp)
    /// Set by the provider once the address is confirmed.
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

impl Claims {
    pub fn new(user_id: &str, email: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
            email_confirmed_at: None,
        }
    }

    pub fn email_verified(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("uid-1", "john@example.com", 24);

        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.email, "john@example.com");
        assert!(claims.exp > claims.iat);
        assert!(!claims.email_verified());
    }

    #[test]
    fn test_claims_tolerate_missing_optional_fields() {
        let json = r#"{"sub": "uid-2", "email": "a@b.com", "exp": 4102444800}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();

        assert_eq!(claims.sub, "uid-2");
        assert_eq!(claims.iat, 0);
        assert!(!claims.email_verified());
    }
}
