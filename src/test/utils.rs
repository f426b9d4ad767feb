// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::database::connect;
use crate::config::{ApplicationSettings, MockEnvironment, SecretManager, migrate_database};
use crate::providers::MemoryNotifier;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-minimum-32-characters-long";
pub const TEST_PASSWORD_PEPPER: &str = "test-pepper-for-unit-tests";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret-minimum-32-chars";
pub const TEST_RESET_SECRET: &str = "test-reset-secret-minimum-32-characters";

/// Environment carrying valid values for every required secret
pub fn test_environment() -> MockEnvironment {
    MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("PASSWORD_PEPPER", TEST_PASSWORD_PEPPER),
        ("REFRESH_TOKEN_SECRET", TEST_REFRESH_SECRET),
        ("RESET_TOKEN_SECRET", TEST_RESET_SECRET),
    ])
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    Arc::new(
        SecretManager::init_from(Arc::new(test_environment()))
            .expect("Test secrets should satisfy length requirements"),
    )
}

/// Fresh in-memory SQLite database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Application data over an in-memory database, with a recording notifier
///
/// ```rust
/// let (app_data, notifier) = setup_test_app_data().await;
/// ```
pub async fn setup_test_app_data() -> (Arc<AppData>, Arc<MemoryNotifier>) {
    let db = setup_test_db().await;
    let notifier = Arc::new(MemoryNotifier::new());
    let app_data = AppData::build(
        db,
        ApplicationSettings::default(),
        test_secret_manager(),
        notifier.clone(),
    );

    (Arc::new(app_data), notifier)
}
