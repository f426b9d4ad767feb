use std::fmt;
use std::sync::Arc;

use crate::config::errors::ConfigError;
use crate::config::{EnvironmentProvider, SecretConfig, SecretType, SystemEnvironment};

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
    password_pepper: String,
    refresh_token_secret: String,
    reset_token_secret: String,
}

impl SecretManager {
    /// Load and validate every secret from the process environment
    ///
    /// # Errors
    /// Returns `ConfigError` if any secret is missing or too short
    pub fn init() -> Result<Self, ConfigError> {
        Self::init_from(Arc::new(SystemEnvironment))
    }

    /// Load and validate every secret through the given environment provider
    pub fn init_from(env_provider: Arc<dyn EnvironmentProvider>) -> Result<Self, ConfigError> {
        let load = |config: SecretConfig| Self::load_secret(env_provider.as_ref(), &config);

        Ok(Self {
            jwt_secret: load(SecretConfig::env_var("JWT_SECRET").min_length(32))?,
            password_pepper: load(SecretConfig::env_var("PASSWORD_PEPPER").min_length(16))?,
            refresh_token_secret: load(SecretConfig::env_var("REFRESH_TOKEN_SECRET").min_length(32))?,
            reset_token_secret: load(SecretConfig::env_var("RESET_TOKEN_SECRET").min_length(32))?,
        })
    }

    /// Key for signing access tokens
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Pepper mixed into every password hash
    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    /// Key for hashing stored refresh tokens
    pub fn refresh_token_secret(&self) -> &str {
        &self.refresh_token_secret
    }

    /// Key for signing password reset tokens
    pub fn reset_token_secret(&self) -> &str {
        &self.reset_token_secret
    }

    /// Load a secret based on its configuration
    fn load_secret(
        env_provider: &dyn EnvironmentProvider,
        config: &SecretConfig,
    ) -> Result<String, ConfigError> {
        let value = match &config.secret_type {
            SecretType::EnvVar { name } => env_provider
                .get_var(name)
                .ok_or_else(|| ConfigError::MissingSecret {
                    secret_name: name.clone(),
                })?,
        };

        if let Some(min_len) = config.min_length {
            if value.len() < min_len {
                return Err(ConfigError::SecretTooShort {
                    secret_name: config.secret_type.name().to_string(),
                    expected: min_len,
                    actual: value.len(),
                });
            }
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field("refresh_token_secret", &"<redacted>")
            .field("reset_token_secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretManager {{ secrets_loaded: 4 }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    const JWT: &str = "jwt-secret-for-tests-0123456789abcdef";
    const PEPPER: &str = "pepper-for-tests-0123";
    const REFRESH: &str = "refresh-secret-for-tests-0123456789ab";
    const RESET: &str = "reset-secret-for-tests-0123456789abcd";

    fn full_env() -> MockEnvironment {
        MockEnvironment::empty().with_vars(&[
            ("JWT_SECRET", JWT),
            ("PASSWORD_PEPPER", PEPPER),
            ("REFRESH_TOKEN_SECRET", REFRESH),
            ("RESET_TOKEN_SECRET", RESET),
        ])
    }

    #[test]
    fn test_successful_initialization_with_valid_secrets() {
        let manager = SecretManager::init_from(Arc::new(full_env())).unwrap();

        assert_eq!(manager.jwt_secret(), JWT);
        assert_eq!(manager.password_pepper(), PEPPER);
        assert_eq!(manager.refresh_token_secret(), REFRESH);
        assert_eq!(manager.reset_token_secret(), RESET);
    }

    #[test]
    fn test_missing_secret_is_named() {
        let env = MockEnvironment::empty().with_vars(&[
            ("JWT_SECRET", JWT),
            ("PASSWORD_PEPPER", PEPPER),
            ("REFRESH_TOKEN_SECRET", REFRESH),
        ]);

        let err = SecretManager::init_from(Arc::new(env)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret { ref secret_name } if secret_name == "RESET_TOKEN_SECRET"));
    }

    #[test]
    fn test_short_pepper_is_rejected() {
        let env = full_env().with_var("PASSWORD_PEPPER", "short");

        let err = SecretManager::init_from(Arc::new(env)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::SecretTooShort {
                expected: 16,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_debug_and_display_redact_secrets() {
        let manager = SecretManager::init_from(Arc::new(full_env())).unwrap();

        let debug_output = format!("{:?}", manager);
        let display_output = format!("{}", manager);

        for secret in [JWT, PEPPER, REFRESH, RESET] {
            assert!(!debug_output.contains(secret));
            assert!(!display_output.contains(secret));
        }
        assert!(debug_output.contains("<redacted>"));
    }
}
