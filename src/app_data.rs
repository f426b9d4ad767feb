use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{ApplicationSettings, SecretManager};
use crate::errors::InternalError;
use crate::providers::{CryptoProvider, LogNotifier, Notifier, ResetTokenProvider, TokenProvider};
use crate::stores::{AuthenticationStore, HospitalStore, IdentityStore, ProfileStore};

/// Stores shared by every coordinator
pub struct Stores {
    pub hospital_store: Arc<HospitalStore>,
    pub identity_store: Arc<IdentityStore>,
    pub profile_store: Arc<ProfileStore>,
    pub authentication_store: Arc<AuthenticationStore>,
}

/// Providers shared by every coordinator
pub struct Providers {
    pub crypto_provider: Arc<CryptoProvider>,
    pub token_provider: Arc<TokenProvider>,
    pub reset_token_provider: Arc<ResetTokenProvider>,
    pub notifier: Arc<dyn Notifier>,
}

/// Centralized application data
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db)
///   ↓ creates once
///   ├─ settings (ApplicationSettings)
///   ├─ secret_manager (Arc<SecretManager>)
///   ├─ stores (hospital, identity, profile, authentication)
///   └─ providers (crypto, token, reset token, notifier)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ RegistrationCoordinator::new(app_data)
///   ├─ HospitalCoordinator::new(app_data)
///   ├─ LoginCoordinator::new(app_data)
///   ├─ PasswordResetCoordinator::new(app_data)
///   └─ RecordCoordinator::<R>::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<ApplicationSettings>,
    pub secret_manager: Arc<SecretManager>,
    pub stores: Stores,
    pub providers: Providers,
}

impl AppData {
    /// Initialize application data from the process environment
    ///
    /// The database should be connected and migrated before calling this.
    /// Outgoing email goes to the log sink.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when settings or secrets fail to load
    pub async fn init(db: DatabaseConnection) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let settings = ApplicationSettings::from_env()
            .map_err(|e| InternalError::parse("application_settings", e.to_string()))?;

        tracing::debug!("Initializing secret manager...");
        let secret_manager = Arc::new(
            SecretManager::init()
                .map_err(|e| InternalError::parse("secret_manager", format!("Secret manager init failed: {}", e)))?,
        );
        tracing::debug!("Secret manager initialized");

        let app_data = Self::build(db, settings, secret_manager, Arc::new(LogNotifier));

        tracing::info!("AppData initialization complete");

        Ok(app_data)
    }

    /// Assemble application data from already-loaded parts
    pub fn build(
        db: DatabaseConnection,
        settings: ApplicationSettings,
        secret_manager: Arc<SecretManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let stores = Stores {
            hospital_store: Arc::new(HospitalStore::new()),
            identity_store: Arc::new(IdentityStore::new()),
            profile_store: Arc::new(ProfileStore::new()),
            authentication_store: Arc::new(AuthenticationStore::new()),
        };

        let crypto_provider = Arc::new(CryptoProvider::new(secret_manager.clone()));
        let providers = Providers {
            token_provider: Arc::new(TokenProvider::new(
                secret_manager.clone(),
                crypto_provider.clone(),
                &settings,
            )),
            reset_token_provider: Arc::new(ResetTokenProvider::new(
                secret_manager.clone(),
                crypto_provider.clone(),
                &settings,
            )),
            crypto_provider,
            notifier,
        };

        Self {
            db,
            settings: Arc::new(settings),
            secret_manager,
            stores,
            providers,
        }
    }
}
