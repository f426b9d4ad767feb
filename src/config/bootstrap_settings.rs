use std::fmt;
use std::sync::Arc;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ConfigError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
}

impl BootstrapSettings {
    /// Load bootstrap settings through the given environment provider
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider>) -> Result<Self, ConfigError> {
        let database_url = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://hospital.db?mode=rwc")
            .min_length(1)
            .load_value()?;

        let server_host = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address)
            .load_value()?;

        let port_value = ConfigSpec::new(env_provider)
            .env_override("PORT")
            .default_value("3000")
            .validator(ConfigSpec::validate_port_range)
            .load_value()?;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Connection strings may embed credentials
        f.debug_struct("BootstrapSettings")
            .field("database_url", &redact_url_credentials(&self.database_url))
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

fn redact_url_credentials(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}<redacted>{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_bootstrap_settings_from_environment() {
        let env = MockEnvironment::empty().with_vars(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
        ]);

        let settings = BootstrapSettings::from_env_provider(Arc::new(env)).unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.server_host(), "127.0.0.1");
        assert_eq!(settings.server_port(), 8080);
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bootstrap_settings_with_defaults() {
        let settings = BootstrapSettings::from_env_provider(Arc::new(MockEnvironment::empty())).unwrap();

        assert_eq!(settings.database_url(), "sqlite://hospital.db?mode=rwc");
        assert_eq!(settings.server_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let env = MockEnvironment::empty().with_var("PORT", "not-a-port");
        assert!(BootstrapSettings::from_env_provider(Arc::new(env)).is_err());
    }

    #[test]
    fn test_debug_redacts_database_credentials() {
        let env = MockEnvironment::empty()
            .with_var("DATABASE_URL", "postgres://admin:hunter2@db:5432/hospital");
        let settings = BootstrapSettings::from_env_provider(Arc::new(env)).unwrap();

        let debug_output = format!("{:?}", settings);
        assert!(!debug_output.contains("hunter2"));
        assert!(debug_output.contains("@db:5432/hospital"));
    }
}
