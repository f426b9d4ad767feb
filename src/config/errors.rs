use thiserror::Error;

/// Errors raised while loading configuration at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required setting '{setting_name}' is missing")]
    MissingSetting { setting_name: String },

    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting { setting_name: String, reason: String },

    #[error("Failed to parse setting '{setting_name}': {error}")]
    ParseError { setting_name: String, error: String },

    #[error("Required secret '{secret_name}' is missing")]
    MissingSecret { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    SecretTooShort {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

impl ConfigError {
    pub fn invalid(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn parse(setting_name: &str, error: impl Into<String>) -> Self {
        Self::ParseError {
            setting_name: setting_name.to_string(),
            error: error.into(),
        }
    }
}
