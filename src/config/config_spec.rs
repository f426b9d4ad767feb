use std::net::IpAddr;
use std::sync::Arc;

use crate::config::EnvironmentProvider;
use crate::config::errors::ConfigError;

/// Where a loaded value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

#[derive(Debug, Clone)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

/// Configuration specification with environment override → default priority
pub struct ConfigSpec {
    env_provider: Arc<dyn EnvironmentProvider>,
    env_override: Option<String>,
    default_value: Option<String>,
    min_length: Option<usize>,
    validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_provider: Arc<dyn EnvironmentProvider>) -> Self {
        Self {
            env_provider,
            env_override: None,
            default_value: None,
            min_length: None,
            validator: None,
        }
    }

    pub fn env_override(mut self, name: &str) -> Self {
        self.env_override = Some(name.to_string());
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    fn setting_name(&self) -> &str {
        self.env_override.as_deref().unwrap_or("unnamed_setting")
    }

    /// Load a setting value with source tracking
    ///
    /// The environment variable wins when set; otherwise the default is used.
    /// Whichever value is chosen must pass validation.
    pub fn load(&self) -> Result<ConfigValue, ConfigError> {
        if let Some(env_var) = &self.env_override {
            if let Some(value) = self.env_provider.get_var(env_var) {
                self.validate_value(&value)?;

                return Ok(ConfigValue {
                    value,
                    source: ConfigValueSource::EnvironmentVariable {
                        name: env_var.clone(),
                    },
                });
            }
        }

        match &self.default_value {
            Some(default) => {
                self.validate_value(default)?;
                Ok(ConfigValue {
                    value: default.clone(),
                    source: ConfigValueSource::Default,
                })
            }
            None => Err(ConfigError::MissingSetting {
                setting_name: self.setting_name().to_string(),
            }),
        }
    }

    /// Load the value and drop source tracking
    pub fn load_value(&self) -> Result<String, ConfigError> {
        self.load().map(|loaded| loaded.value)
    }

    /// Validate a setting value according to the ConfigSpec rules
    pub fn validate_value(&self, value: &str) -> Result<(), ConfigError> {
        if let Some(min_len) = self.min_length {
            if value.len() < min_len {
                return Err(ConfigError::invalid(
                    self.setting_name(),
                    format!("Value must be at least {} characters long", min_len),
                ));
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| ConfigError::invalid(self.setting_name(), reason))?;
        }

        Ok(())
    }
}

/// Type parsing and validation utilities for configuration values
impl ConfigSpec {
    pub fn parse_port(value: &str, setting_name: &str) -> Result<u16, ConfigError> {
        let port = value.trim().parse::<u16>().map_err(|e| {
            ConfigError::parse(
                setting_name,
                format!("Expected port number (1-65535), got '{}': {}", value, e),
            )
        })?;

        if port == 0 {
            return Err(ConfigError::invalid(
                setting_name,
                "Port number must be between 1 and 65535",
            ));
        }

        Ok(port)
    }

    pub fn parse_u64(value: &str, setting_name: &str) -> Result<u64, ConfigError> {
        value.trim().parse::<u64>().map_err(|e| {
            ConfigError::parse(
                setting_name,
                format!("Expected positive integer, got '{}': {}", value, e),
            )
        })
    }

    pub fn validate_integer_range(value: &str, min: u64, max: u64) -> Result<(), String> {
        let parsed = value
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("Expected integer between {} and {}", min, max))?;

        if parsed < min || parsed > max {
            return Err(format!("Value {} is outside valid range {}-{}", parsed, min, max));
        }

        Ok(())
    }

    pub fn validate_port_range(value: &str) -> Result<(), String> {
        Self::validate_integer_range(value, 1, u16::MAX as u64)
    }

    pub fn validate_host_address(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("Host address cannot be empty".to_string());
        }

        if value.chars().any(char::is_whitespace) {
            return Err("Host address cannot contain whitespace characters".to_string());
        }

        // Dotted quads must be real IPv4 addresses; anything else is a hostname
        let looks_like_ipv4 = value.split('.').count() == 4
            && value.chars().all(|c| c.is_ascii_digit() || c == '.');
        if looks_like_ipv4 && value.parse::<IpAddr>().is_err() {
            return Err(format!("Invalid IPv4 address: {}", value));
        }

        Ok(())
    }

    pub fn validate_http_url(value: &str) -> Result<(), String> {
        let rest = value
            .strip_prefix("http://")
            .or_else(|| value.strip_prefix("https://"))
            .ok_or_else(|| "URL must start with http:// or https://".to_string())?;

        if rest.is_empty() || rest.contains('?') || rest.contains('#') {
            return Err("URL must name a host and carry no query or fragment".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn spec(env: MockEnvironment) -> ConfigSpec {
        ConfigSpec::new(Arc::new(env))
    }

    #[test]
    fn test_environment_overrides_default() {
        let loaded = spec(MockEnvironment::empty().with_var("PORT", "8080"))
            .env_override("PORT")
            .default_value("3000")
            .load()
            .unwrap();

        assert_eq!(loaded.value, "8080");
        assert_eq!(
            loaded.source,
            ConfigValueSource::EnvironmentVariable {
                name: "PORT".to_string()
            }
        );
    }

    #[test]
    fn test_default_used_when_unset() {
        let loaded = spec(MockEnvironment::empty())
            .env_override("PORT")
            .default_value("3000")
            .load()
            .unwrap();

        assert_eq!(loaded.value, "3000");
        assert_eq!(loaded.source, ConfigValueSource::Default);
    }

    #[test]
    fn test_missing_without_default_fails() {
        let err = spec(MockEnvironment::empty())
            .env_override("DATABASE_URL")
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingSetting { .. }));
    }

    #[test]
    fn test_validator_applies_to_environment_value() {
        let err = spec(MockEnvironment::empty().with_var("PORT", "70000"))
            .env_override("PORT")
            .default_value("3000")
            .validator(ConfigSpec::validate_port_range)
            .load()
            .unwrap_err();

        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_min_length() {
        let err = spec(MockEnvironment::empty().with_var("DATABASE_URL", ""))
            .env_override("DATABASE_URL")
            .min_length(1)
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidSetting { .. }));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(ConfigSpec::parse_port(" 8080 ", "PORT").unwrap(), 8080);
        assert!(ConfigSpec::parse_port("0", "PORT").is_err());
        assert!(ConfigSpec::parse_port("http", "PORT").is_err());
    }

    #[test]
    fn test_validate_host_address() {
        assert!(ConfigSpec::validate_host_address("0.0.0.0").is_ok());
        assert!(ConfigSpec::validate_host_address("localhost").is_ok());
        assert!(ConfigSpec::validate_host_address("::1").is_ok());
        assert!(ConfigSpec::validate_host_address("256.1.1.1").is_err());
        assert!(ConfigSpec::validate_host_address("").is_err());
        assert!(ConfigSpec::validate_host_address("my host").is_err());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(ConfigSpec::validate_http_url("http://localhost:5173/reset-password").is_ok());
        assert!(ConfigSpec::validate_http_url("https://app.example.com/reset").is_ok());
        assert!(ConfigSpec::validate_http_url("ftp://example.com").is_err());
        assert!(ConfigSpec::validate_http_url("http://example.com/reset?x=1").is_err());
    }
}
