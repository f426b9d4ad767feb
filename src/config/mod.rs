// Configuration layer - environment, settings, secrets, logging, database
mod application_settings;
mod bootstrap_settings;
mod config_spec;
pub mod database;
mod env_provider;
mod errors;
mod logging;
mod secret_config;
mod secret_manager;

pub use application_settings::{ApplicationSettings, MIN_TEMP_PASSWORD_LENGTH};
pub use bootstrap_settings::BootstrapSettings;
pub use config_spec::{ConfigSpec, ConfigValue, ConfigValueSource};
pub use database::{init_database, migrate_database};
pub use env_provider::{EnvironmentProvider, MockEnvironment, SystemEnvironment};
pub use errors::ConfigError;
pub use logging::{LoggingConfig, LoggingError, init_logging};
pub use secret_config::{SecretConfig, SecretType};
pub use secret_manager::SecretManager;
