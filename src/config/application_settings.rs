use std::sync::Arc;
use std::time::Duration;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ConfigError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

/// Shortest temporary password the registration workflow may issue
pub const MIN_TEMP_PASSWORD_LENGTH: usize = 12;

/// Business settings passed explicitly to providers and coordinators
#[derive(Debug, Clone)]
pub struct ApplicationSettings {
    password_reset_url: String,
    password_reset_ttl: Duration,
    mail_from: String,
    jwt_expiration: Duration,
    refresh_token_expiration: Duration,
    temp_password_length: usize,
}

impl ApplicationSettings {
    /// Load application settings through the given environment provider
    ///
    /// # Errors
    /// Returns `ConfigError` when a value is present but fails validation
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider>) -> Result<Self, ConfigError> {
        let password_reset_url = ConfigSpec::new(env_provider.clone())
            .env_override("PASSWORD_RESET_URL")
            .default_value("http://localhost:5173/reset-password")
            .validator(ConfigSpec::validate_http_url)
            .load_value()?;

        let reset_ttl = ConfigSpec::new(env_provider.clone())
            .env_override("PASSWORD_RESET_TTL_SECONDS")
            .default_value("259200")
            .validator(|value| ConfigSpec::validate_integer_range(value, 60, 30 * 24 * 60 * 60))
            .load_value()?;

        let mail_from = ConfigSpec::new(env_provider.clone())
            .env_override("MAIL_FROM")
            .default_value("noreply@localhost")
            .min_length(3)
            .load_value()?;

        let jwt_minutes = ConfigSpec::new(env_provider.clone())
            .env_override("JWT_EXPIRATION_MINUTES")
            .default_value("15")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 24 * 60))
            .load_value()?;

        let refresh_days = ConfigSpec::new(env_provider.clone())
            .env_override("REFRESH_EXPIRATION_DAYS")
            .default_value("7")
            .validator(|value| ConfigSpec::validate_integer_range(value, 1, 365))
            .load_value()?;

        let temp_password_length = ConfigSpec::new(env_provider)
            .env_override("TEMP_PASSWORD_LENGTH")
            .default_value("12")
            .validator(|value| {
                ConfigSpec::validate_integer_range(value, MIN_TEMP_PASSWORD_LENGTH as u64, 64)
            })
            .load_value()?;

        Ok(Self {
            password_reset_url,
            password_reset_ttl: Duration::from_secs(ConfigSpec::parse_u64(
                &reset_ttl,
                "PASSWORD_RESET_TTL_SECONDS",
            )?),
            mail_from,
            jwt_expiration: Duration::from_secs(
                ConfigSpec::parse_u64(&jwt_minutes, "JWT_EXPIRATION_MINUTES")? * 60,
            ),
            refresh_token_expiration: Duration::from_secs(
                ConfigSpec::parse_u64(&refresh_days, "REFRESH_EXPIRATION_DAYS")? * 24 * 60 * 60,
            ),
            temp_password_length: ConfigSpec::parse_u64(
                &temp_password_length,
                "TEMP_PASSWORD_LENGTH",
            )? as usize,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    /// Base URL of the frontend page that completes a password reset
    pub fn password_reset_url(&self) -> &str {
        &self.password_reset_url
    }

    pub fn password_reset_ttl(&self) -> Duration {
        self.password_reset_ttl
    }

    /// Sender address for outgoing mail
    pub fn mail_from(&self) -> &str {
        &self.mail_from
    }

    pub fn jwt_expiration(&self) -> Duration {
        self.jwt_expiration
    }

    pub fn refresh_token_expiration(&self) -> Duration {
        self.refresh_token_expiration
    }

    pub fn temp_password_length(&self) -> usize {
        self.temp_password_length
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            password_reset_url: "http://localhost:5173/reset-password".to_string(),
            password_reset_ttl: Duration::from_secs(259_200),
            mail_from: "noreply@localhost".to_string(),
            jwt_expiration: Duration::from_secs(15 * 60),
            refresh_token_expiration: Duration::from_secs(7 * 24 * 60 * 60),
            temp_password_length: MIN_TEMP_PASSWORD_LENGTH,
        }
    }
}
