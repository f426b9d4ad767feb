use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, IntoActiveModel, Set};

use crate::AppData;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::HospitalError;
use crate::resources::required_text;
use crate::stores::{HospitalStore, IdentityStore, ProfileStore};
use crate::types::db::hospital;
use crate::types::dto::hospital::{HospitalResponse, SystemStatsResponse};
use crate::types::internal::context::RequestContext;
use crate::types::internal::profile_role::{ROLE_ADMIN, ROLE_DOCTOR, ROLE_PATIENT, ROLE_STAFF};
use crate::types::internal::{EmailAddress, HospitalUpdate};

const WORKFLOW: &str = "hospital_contact_sync";

/// Hospital reads, updates with contact-email sync, and platform statistics
pub struct HospitalCoordinator {
    db: DatabaseConnection,
    hospital_store: Arc<HospitalStore>,
    identity_store: Arc<IdentityStore>,
    profile_store: Arc<ProfileStore>,
}

impl HospitalCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            hospital_store: Arc::clone(&app_data.stores.hospital_store),
            identity_store: Arc::clone(&app_data.stores.identity_store),
            profile_store: Arc::clone(&app_data.stores.profile_store),
        }
    }

    pub async fn list_hospitals(&self) -> Result<Vec<HospitalResponse>, InternalError> {
        let hospitals = self.hospital_store.list_hospitals(&self.db).await?;
        Ok(hospitals.into_iter().map(HospitalResponse::from).collect())
    }

    pub async fn get_hospital(&self, hospital_id: &str) -> Result<HospitalResponse, InternalError> {
        self.hospital_store
            .find_hospital(&self.db, hospital_id)
            .await?
            .map(HospitalResponse::from)
            .ok_or_else(|| InternalError::not_found("Hospital", hospital_id))
    }

    /// Apply a hospital update and propagate a contact email change
    ///
    /// When `contact_email` changes, every hospital_admin profile of the
    /// hospital, and the identity behind it, is moved to the new address in
    /// the same transaction as the hospital row.
    pub async fn update_hospital(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        update: HospitalUpdate,
    ) -> Result<HospitalResponse, InternalError> {
        let update = Self::validate(update)?;

        let txn = begin_transaction(&self.db).await?;

        let (hospital, synced) = match self.apply_update(&txn, hospital_id, update).await {
            Ok(result) => result,
            Err(err) => {
                drop(txn);
                return Err(Self::map_failure(err));
            }
        };

        commit_transaction(txn).await.map_err(Self::map_failure)?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            hospital_id = %hospital.id,
            synced_admins = synced,
            "Hospital updated"
        );

        Ok(hospital.into())
    }

    /// Counts across the whole platform
    pub async fn system_stats(&self) -> Result<SystemStatsResponse, InternalError> {
        Ok(SystemStatsResponse {
            hospitals: self.hospital_store.count_hospitals(&self.db).await?,
            total_users: self.profile_store.count_excluding_role(&self.db, ROLE_ADMIN).await?,
            doctors: self.profile_store.count_by_role(&self.db, ROLE_DOCTOR).await?,
            staff: self.profile_store.count_by_role(&self.db, ROLE_STAFF).await?,
            patients: self.profile_store.count_by_role(&self.db, ROLE_PATIENT).await?,
        })
    }

    /// Trim inputs, reject a blank name and normalize a blank contact email to "cleared"
    fn validate(update: HospitalUpdate) -> Result<HospitalUpdate, InternalError> {
        let name = update.name.map(|name| required_text("name", name)).transpose()?;

        let contact_email = match update.contact_email {
            Some(raw) => Some(
                EmailAddress::parse_optional("contact_email", raw.as_deref())?
                    .map(EmailAddress::into_inner),
            ),
            None => None,
        };

        Ok(HospitalUpdate {
            name,
            contact_email,
            ..update
        })
    }

    async fn apply_update(
        &self,
        txn: &DatabaseTransaction,
        hospital_id: &str,
        update: HospitalUpdate,
    ) -> Result<(hospital::Model, usize), InternalError> {
        let existing = self
            .hospital_store
            .find_hospital(txn, hospital_id)
            .await?
            .ok_or_else(|| InternalError::not_found("Hospital", hospital_id))?;

        let previous_email = existing.contact_email.clone();
        let synced = match &update.contact_email {
            Some(new_email) if *new_email != previous_email => {
                self.sync_contact_email(txn, hospital_id, new_email.as_deref()).await?
            }
            _ => 0,
        };

        let mut active = existing.clone().into_active_model();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(address) = update.address {
            active.address = Set(address);
        }
        if let Some(contact_email) = update.contact_email {
            active.contact_email = Set(contact_email);
        }
        if let Some(contact_phone) = update.contact_phone {
            active.contact_phone = Set(contact_phone);
        }
        if let Some(active_flag) = update.active {
            active.active = Set(active_flag);
        }

        if !active.is_changed() {
            return Ok((existing, synced));
        }

        let hospital = self.hospital_store.update_hospital(txn, active).await?;
        Ok((hospital, synced))
    }

    /// Move every hospital_admin of the hospital to `new_email`; returns how many were moved
    async fn sync_contact_email(
        &self,
        txn: &DatabaseTransaction,
        hospital_id: &str,
        new_email: Option<&str>,
    ) -> Result<usize, InternalError> {
        let admins = self.profile_store.find_hospital_admins(txn, hospital_id).await?;

        let Some(new_email) = new_email else {
            if admins.is_empty() {
                return Ok(0);
            }
            return Err(HospitalError::ContactEmailRequired {
                hospital_id: hospital_id.to_string(),
            }
            .into());
        };

        let now = Utc::now().timestamp();
        for admin in &admins {
            self.profile_store.set_email(txn, &admin.id, new_email).await?;

            if let Some(user_id) = &admin.user_id {
                self.identity_store
                    .update_login_email(txn, user_id, new_email, now)
                    .await
                    .map_err(|err| {
                        if err.is_unique_violation() {
                            HospitalError::ContactEmailTaken {
                                email: new_email.to_string(),
                            }
                            .into()
                        } else {
                            err
                        }
                    })?;
            }
        }

        tracing::debug!("Synced contact email to {} hospital admin(s)", admins.len());
        Ok(admins.len())
    }

    fn map_failure(err: InternalError) -> InternalError {
        match &err {
            InternalError::Hospital(_) | InternalError::Validation(_) => {
                tracing::warn!("Hospital update rejected: {}", err);
            }
            InternalError::NotFound { .. } => {}
            _ => tracing::error!("Hospital update failed: {}", err),
        }
        err.into_transaction_error(WORKFLOW)
    }
}
