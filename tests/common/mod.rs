// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use hospital_backend::AppData;
use hospital_backend::config::database::connect;
use hospital_backend::config::{ApplicationSettings, MockEnvironment, SecretManager, migrate_database};
use hospital_backend::coordinators::RegistrationCoordinator;
use hospital_backend::providers::MemoryNotifier;
use hospital_backend::types::db::{hospital, profile, user};
use hospital_backend::types::dto::hospital::{HospitalRegistrationRequest, RegisteredHospitalResponse};
use hospital_backend::types::internal::context::RequestContext;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

/// Environment with valid values for every required secret
pub fn test_environment() -> MockEnvironment {
    MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", "integration-jwt-secret-at-least-32-characters"),
        ("PASSWORD_PEPPER", "integration-pepper-16"),
        ("REFRESH_TOKEN_SECRET", "integration-refresh-secret-32-characters"),
        ("RESET_TOKEN_SECRET", "integration-reset-secret-32-characters-long"),
    ])
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Application data over a fresh database, with a recording notifier
pub async fn setup_app_data() -> (Arc<AppData>, Arc<MemoryNotifier>) {
    setup_app_data_with(ApplicationSettings::default(), Arc::new(MemoryNotifier::new())).await
}

pub async fn setup_app_data_with(
    settings: ApplicationSettings,
    notifier: Arc<MemoryNotifier>,
) -> (Arc<AppData>, Arc<MemoryNotifier>) {
    let db = setup_test_db().await;
    let secret_manager = Arc::new(
        SecretManager::init_from(Arc::new(test_environment())).expect("Test secrets should be valid"),
    );
    let app_data = AppData::build(db, settings, secret_manager, notifier.clone());

    (Arc::new(app_data), notifier)
}

/// Register a hospital through the real workflow
pub async fn register(app_data: &Arc<AppData>, name: &str, email: &str) -> RegisteredHospitalResponse {
    RegistrationCoordinator::new(Arc::clone(app_data))
        .register_hospital(
            &RequestContext::anonymous(),
            HospitalRegistrationRequest {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Registration should succeed")
}

/// Row counts of (hospitals, identities, profiles)
pub async fn row_counts(db: &DatabaseConnection) -> (u64, u64, u64) {
    (
        hospital::Entity::find().count(db).await.expect("count hospitals"),
        user::Entity::find().count(db).await.expect("count users"),
        profile::Entity::find().count(db).await.expect("count profiles"),
    )
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        for var in &vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }
}

/// Global mutex for tests that modify environment variables
///
/// Environment variables are process-global, so tests that modify them
/// must run serially to avoid race conditions.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
