use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseConnection, DatabaseTransaction, Set};

use crate::AppData;
use crate::config::ApplicationSettings;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::RegistrationError;
use crate::providers::CryptoProvider;
use crate::resources::{required_text, today};
use crate::stores::{HospitalStore, IdentityStore, NewHospital, NewIdentity, ProfileStore};
use crate::types::db::{hospital, profile};
use crate::types::dto::hospital::{HospitalRegistrationRequest, RegisteredHospitalResponse};
use crate::types::internal::EmailAddress;
use crate::types::internal::context::RequestContext;
use crate::types::internal::profile_role::ROLE_HOSPITAL_ADMIN;

const WORKFLOW: &str = "hospital_registration";
pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Hospital and Admin account created successfully.";

/// Validated registration input
struct Registration {
    name: String,
    address: Option<String>,
    email: EmailAddress,
    phone: Option<String>,
}

/// Creates a hospital together with its first hospital_admin identity and profile
pub struct RegistrationCoordinator {
    db: DatabaseConnection,
    settings: Arc<ApplicationSettings>,
    hospital_store: Arc<HospitalStore>,
    identity_store: Arc<IdentityStore>,
    profile_store: Arc<ProfileStore>,
    crypto_provider: Arc<CryptoProvider>,
}

impl RegistrationCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            settings: Arc::clone(&app_data.settings),
            hospital_store: Arc::clone(&app_data.stores.hospital_store),
            identity_store: Arc::clone(&app_data.stores.identity_store),
            profile_store: Arc::clone(&app_data.stores.profile_store),
            crypto_provider: Arc::clone(&app_data.providers.crypto_provider),
        }
    }

    /// Register a hospital and provision its admin account in one transaction
    ///
    /// # Returns
    /// * `Ok(RegisteredHospitalResponse)` - Includes the plaintext temporary password, exactly once
    /// * `Err(InternalError)` - Validation, IdentityExists on a taken email, or a rolled-back workflow
    pub async fn register_hospital(
        &self,
        ctx: &RequestContext,
        request: HospitalRegistrationRequest,
    ) -> Result<RegisteredHospitalResponse, InternalError> {
        let registration = Self::validate(request)?;

        let temp_password = self
            .crypto_provider
            .generate_temp_password(self.settings.temp_password_length());
        let password_hash = self.crypto_provider.hash_password(&temp_password)?;

        let txn = begin_transaction(&self.db).await?;
        let email = registration.email.as_str().to_string();

        let hospital = match self.provision(&txn, registration, password_hash).await {
            Ok(hospital) => hospital,
            Err(err) => {
                // Dropping the transaction rolls back every insert
                drop(txn);
                return Err(Self::map_failure(err, &email));
            }
        };

        commit_transaction(txn)
            .await
            .map_err(|err| Self::map_failure(err, &email))?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            hospital_id = %hospital.id,
            "Registered hospital with admin {}",
            email
        );

        Ok(RegisteredHospitalResponse {
            hospital: hospital.into(),
            email,
            temp_password,
            message: REGISTRATION_SUCCESS_MESSAGE.to_string(),
        })
    }

    fn validate(request: HospitalRegistrationRequest) -> Result<Registration, InternalError> {
        let email = EmailAddress::parse("email", request.email.as_deref().unwrap_or_default())?;
        let name = required_text("name", request.name.unwrap_or_default())?;

        Ok(Registration {
            name,
            address: request.address,
            email,
            phone: request.phone,
        })
    }

    async fn provision(
        &self,
        txn: &DatabaseTransaction,
        registration: Registration,
        password_hash: String,
    ) -> Result<hospital::Model, InternalError> {
        let email = registration.email.into_inner();

        if self.identity_store.username_in_use(txn, &email).await? {
            return Err(RegistrationError::IdentityExists { email }.into());
        }

        let now = Utc::now();
        let hospital = self
            .hospital_store
            .create_hospital(
                txn,
                NewHospital {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: registration.name.clone(),
                    address: registration.address,
                    contact_email: Some(email.clone()),
                    contact_phone: registration.phone,
                    created_at: now.timestamp(),
                },
            )
            .await?;

        let identity = self
            .identity_store
            .create_identity(
                txn,
                NewIdentity {
                    id: uuid::Uuid::new_v4().to_string(),
                    email: email.clone(),
                    password_hash,
                    created_at: now.timestamp(),
                },
            )
            .await?;

        self.profile_store
            .create_profile(
                txn,
                profile::ActiveModel {
                    id: Set(identity.id.clone()),
                    user_id: Set(Some(identity.id)),
                    role: Set(ROLE_HOSPITAL_ADMIN.to_string()),
                    role_details: Set(None),
                    health_id: Set(None),
                    hospital_id: Set(Some(hospital.id.clone())),
                    department_id: Set(None),
                    full_name: Set(Some(format!("{} Admin", registration.name))),
                    email: Set(Some(email)),
                    contact_number: Set(None),
                    is_active: Set(true),
                    join_date: Set(today(now)),
                    registered_by: Set(None),
                    created_at: Set(now.timestamp()),
                },
            )
            .await?;

        Ok(hospital)
    }

    fn map_failure(err: InternalError, email: &str) -> InternalError {
        if err.is_unique_violation() {
            tracing::warn!("Registration raced on existing email {}", email);
            return RegistrationError::IdentityExists {
                email: email.to_string(),
            }
            .into();
        }

        if let InternalError::Registration(RegistrationError::IdentityExists { .. }) = &err {
            tracing::warn!("Registration rejected: {} already has an account", email);
        } else {
            tracing::error!("Hospital registration failed: {}", err);
        }

        err.into_transaction_error(WORKFLOW)
    }
}
