use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseConnection, DatabaseTransaction};

use crate::AppData;
use crate::config::ApplicationSettings;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, ValidationError};
use crate::providers::{CryptoProvider, EmailMessage, Notifier, ResetTokenProvider};
use crate::stores::{AuthenticationStore, IdentityStore};
use crate::types::db::user;
use crate::types::dto::common::MessageResponse;
use crate::types::internal::EmailAddress;
use crate::types::internal::context::RequestContext;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const RESET_REQUESTED_MESSAGE: &str = "Password reset link has been sent to your email.";
pub const RESET_COMPLETED_MESSAGE: &str = "Password has been reset successfully.";
const RESET_EMAIL_SUBJECT: &str = "Password Reset Request";

/// Forgotten-password flow: issue a reset link, then accept a new password
pub struct PasswordResetCoordinator {
    db: DatabaseConnection,
    settings: Arc<ApplicationSettings>,
    identity_store: Arc<IdentityStore>,
    authentication_store: Arc<AuthenticationStore>,
    crypto_provider: Arc<CryptoProvider>,
    reset_token_provider: Arc<ResetTokenProvider>,
    notifier: Arc<dyn Notifier>,
}

impl PasswordResetCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            settings: Arc::clone(&app_data.settings),
            identity_store: Arc::clone(&app_data.stores.identity_store),
            authentication_store: Arc::clone(&app_data.stores.authentication_store),
            crypto_provider: Arc::clone(&app_data.providers.crypto_provider),
            reset_token_provider: Arc::clone(&app_data.providers.reset_token_provider),
            notifier: Arc::clone(&app_data.providers.notifier),
        }
    }

    /// Send a reset link if an identity uses this email
    ///
    /// The answer is the same whether or not the email matched.
    pub async fn request_reset(
        &self,
        ctx: &RequestContext,
        email: &str,
    ) -> Result<MessageResponse, InternalError> {
        let email = EmailAddress::parse("email", email)?;

        match self.identity_store.find_by_email(&self.db, email.as_str()).await? {
            Some(identity) => {
                let token = self
                    .reset_token_provider
                    .make_token(&identity, Utc::now().timestamp())?;
                let uidb64 = self.reset_token_provider.encode_uid(&identity.id);
                let link = self.reset_token_provider.build_reset_link(
                    self.settings.password_reset_url(),
                    &uidb64,
                    &token,
                );

                self.notifier
                    .send(EmailMessage {
                        from: self.settings.mail_from().to_string(),
                        to: identity.email.clone(),
                        subject: RESET_EMAIL_SUBJECT.to_string(),
                        body: format!("Click the link below to reset your password:\n{}", link),
                    })
                    .await?;

                tracing::info!(
                    request_id = %ctx.request_id,
                    user_id = %identity.id,
                    "Password reset link sent"
                );
            }
            None => {
                tracing::debug!(request_id = %ctx.request_id, "Password reset requested for unknown email");
            }
        }

        Ok(MessageResponse::new(RESET_REQUESTED_MESSAGE))
    }

    /// Check a reset link and set the new password
    ///
    /// Every link problem fails with the same `InvalidResetLink` error. On
    /// success the identity's refresh tokens are revoked.
    pub async fn confirm_reset(
        &self,
        ctx: &RequestContext,
        uidb64: &str,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, InternalError> {
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::too_short("new_password", MIN_PASSWORD_LENGTH).into());
        }

        let user_id = self.reset_token_provider.decode_uid(uidb64)?;
        let identity = self
            .identity_store
            .find_by_id(&self.db, &user_id)
            .await?
            .ok_or_else(|| CredentialError::invalid_reset_link("unknown identity"))?;

        let now = Utc::now().timestamp();
        self.reset_token_provider.check_token(&identity, token, now)?;

        let password_hash = self.crypto_provider.hash_password(new_password)?;

        let txn = begin_transaction(&self.db).await?;
        let revoked = match self
            .store_new_password(&txn, &identity, password_hash, now)
            .await
        {
            Ok(revoked) => revoked,
            Err(err) => {
                drop(txn);
                tracing::error!("Password reset failed: {}", err);
                return Err(err);
            }
        };
        commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %identity.id,
            revoked_refresh_tokens = revoked,
            "Password reset completed"
        );

        Ok(MessageResponse::new(RESET_COMPLETED_MESSAGE))
    }

    async fn store_new_password(
        &self,
        txn: &DatabaseTransaction,
        identity: &user::Model,
        password_hash: String,
        now: i64,
    ) -> Result<u64, InternalError> {
        let replaced = self
            .identity_store
            .replace_password_hash(txn, &identity.id, &identity.password_hash, password_hash, now)
            .await?;
        if !replaced {
            return Err(CredentialError::invalid_reset_link("password changed since link was issued").into());
        }
        self.authentication_store
            .revoke_all_for_user(txn, &identity.id)
            .await
    }
}
