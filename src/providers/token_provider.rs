use std::fmt;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use rand::Rng;

use crate::config::{ApplicationSettings, SecretManager};
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::CryptoProvider;
use crate::types::internal::auth::Claims;

/// Provides JWT generation and validation plus refresh token operations
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    crypto_provider: Arc<CryptoProvider>,
    jwt_expiration_seconds: i64,
    refresh_expiration_seconds: i64,
}

impl TokenProvider {
    pub fn new(
        secret_manager: Arc<SecretManager>,
        crypto_provider: Arc<CryptoProvider>,
        settings: &ApplicationSettings,
    ) -> Self {
        Self {
            secret_manager,
            crypto_provider,
            jwt_expiration_seconds: settings.jwt_expiration().as_secs() as i64,
            refresh_expiration_seconds: settings.refresh_token_expiration().as_secs() as i64,
        }
    }

    /// Generate an access JWT for an identity
    ///
    /// # Arguments
    /// * `user_id` - Identity ID placed in `sub`
    /// * `role` - Profile role placed in the claims
    pub fn generate_jwt(&self, user_id: &str, role: &str) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: now + self.jwt_expiration_seconds,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))
    }

    /// Validate a JWT and return the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::ExpiredToken("jwt".to_string()).into(),
            _ => {
                tracing::debug!("JWT rejected: {}", e);
                CredentialError::invalid_token("jwt", "invalid signature or malformed").into()
            }
        })
    }

    /// Generate a random refresh token (32 bytes, base64url)
    pub fn generate_refresh_token(&self) -> String {
        let random_bytes: [u8; 32] = rand::rng().random();
        URL_SAFE_NO_PAD.encode(random_bytes)
    }

    /// Hash a refresh token for storage
    ///
    /// # Returns
    /// * `Ok(String)` - Hex-encoded HMAC-SHA256 keyed with REFRESH_TOKEN_SECRET
    pub fn hash_refresh_token(&self, token: &str) -> Result<String, InternalError> {
        self.crypto_provider
            .hmac_sha256_token(self.secret_manager.refresh_token_secret(), token)
    }

    /// Expiration timestamp for a refresh token issued at `now`
    pub fn refresh_expiration_from(&self, now: i64) -> i64 {
        now + self.refresh_expiration_seconds
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("secret_manager", &"<redacted>")
            .field("jwt_expiration_seconds", &self.jwt_expiration_seconds)
            .field("refresh_expiration_seconds", &self.refresh_expiration_seconds)
            .finish()
    }
}

impl fmt::Display for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenProvider {{ jwt_expiration: {}s, refresh_expiration: {}s }}",
            self.jwt_expiration_seconds, self.refresh_expiration_seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::test_secret_manager;

    fn create_test_token_provider() -> TokenProvider {
        let secrets = test_secret_manager();
        let crypto = Arc::new(CryptoProvider::new(secrets.clone()));
        TokenProvider::new(secrets, crypto, &ApplicationSettings::default())
    }

    #[test]
    fn test_generate_and_validate_jwt() {
        let provider = create_test_token_provider();
        let token = provider.generate_jwt("user-1", "hospital_admin").unwrap();

        let claims = provider.validate_jwt(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, "hospital_admin");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_tampered_jwt_is_rejected() {
        let provider = create_test_token_provider();
        let token = provider.generate_jwt("user-1", "doctor").unwrap();
        let tampered = format!("{}x", token);

        let err = provider.validate_jwt(&tampered).unwrap_err();
        assert!(matches!(
            err,
            InternalError::Credential(CredentialError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_expired_jwt_is_reported_as_expired() {
        let provider = create_test_token_provider();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            role: "staff".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(test_secret_manager().jwt_secret().as_bytes()),
        )
        .unwrap();

        let err = provider.validate_jwt(&token).unwrap_err();
        assert!(matches!(
            err,
            InternalError::Credential(CredentialError::ExpiredToken(_))
        ));
    }

    #[test]
    fn test_refresh_tokens_are_unique_and_hash_stably() {
        let provider = create_test_token_provider();

        let first = provider.generate_refresh_token();
        let second = provider.generate_refresh_token();
        assert_ne!(first, second);

        assert_eq!(
            provider.hash_refresh_token(&first).unwrap(),
            provider.hash_refresh_token(&first).unwrap()
        );
        assert_ne!(
            provider.hash_refresh_token(&first).unwrap(),
            provider.hash_refresh_token(&second).unwrap()
        );
    }

    #[test]
    fn test_refresh_expiration_is_seven_days() {
        let provider = create_test_token_provider();
        assert_eq!(provider.refresh_expiration_from(0), 7 * 24 * 60 * 60);
    }
}
