use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
};

/// Verifies bearer tokens issued by the hosted identity provider (HS256 with
/// a shared secret). Token creation lives with the provider; the encoding key
/// here exists for test fixtures and local development tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &SecretString) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        // The provider sets aud to "authenticated"; we only care about sub/email/exp
        let mut validation = Validation::default();
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            })
    }

    pub fn create_token(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_jwt_create_and_validate() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.identity_jwt_secret);

        let claims = Claims::new("uid-1", "john@example.com", 1);
        let token = jwt_service.create_token(&claims).unwrap();

        assert!(!token.is_empty());

        let decoded = jwt_service.validate_token(&token).unwrap();
        assert_eq!(decoded.sub, "uid-1");
        assert_eq!(decoded.email, "john@example.com");
    }

    #[test]
    fn test_jwt_invalid_token() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.identity_jwt_secret);

        let result = jwt_service.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_jwt_expired_token_rejected() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.identity_jwt_secret);

        let claims = Claims::new("uid-1", "john@example.com", -2);
        let token = jwt_service.create_token(&claims).unwrap();

        let result = jwt_service.validate_token(&token);
        match result {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("expired")),
            other => panic!("Expected Unauthorized error, got {:?}", other),
        }
    }

    #[test]
    fn test_jwt_wrong_secret_rejected() {
        let config = Config::test_config();
        let issuer = JwtService::new(&SecretString::from("other_secret_entirely".to_string()));
        let verifier = JwtService::new(&config.identity_jwt_secret);

        let claims = Claims::new("uid-1", "john@example.com", 1);
        let token = issuer.create_token(&claims).unwrap();

        assert!(verifier.validate_token(&token).is_err());
    }
}
