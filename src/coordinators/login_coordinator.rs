use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::AppData;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::{CryptoProvider, TokenProvider};
use crate::stores::{AuthenticationStore, IdentityStore, ProfileStore};
use crate::types::dto::auth::{LoginResponse, RefreshResponse};
use crate::types::internal::context::RequestContext;

/// Login and access token refresh
pub struct LoginCoordinator {
    db: DatabaseConnection,
    identity_store: Arc<IdentityStore>,
    profile_store: Arc<ProfileStore>,
    authentication_store: Arc<AuthenticationStore>,
    crypto_provider: Arc<CryptoProvider>,
    token_provider: Arc<TokenProvider>,
}

impl LoginCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            identity_store: Arc::clone(&app_data.stores.identity_store),
            profile_store: Arc::clone(&app_data.stores.profile_store),
            authentication_store: Arc::clone(&app_data.stores.authentication_store),
            crypto_provider: Arc::clone(&app_data.providers.crypto_provider),
            token_provider: Arc::clone(&app_data.providers.token_provider),
        }
    }

    /// Verify credentials and issue an access JWT plus a refresh token
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, InternalError> {
        let identity = self
            .identity_store
            .find_by_username(&self.db, email.trim())
            .await?;

        let Some(identity) = identity else {
            // Spend the same hashing time as a real check
            self.crypto_provider.burn_verification(password);
            tracing::debug!(request_id = %ctx.request_id, "Login for unknown email");
            return Err(CredentialError::InvalidCredentials.into());
        };

        if !self.crypto_provider.verify_password(&identity.password_hash, password)? {
            tracing::debug!(request_id = %ctx.request_id, "Login with wrong password");
            return Err(CredentialError::InvalidCredentials.into());
        }

        let profile = self
            .profile_store
            .find_by_user_id(&self.db, &identity.id)
            .await?
            .ok_or_else(|| CredentialError::ProfileNotFound {
                user_id: identity.id.clone(),
            })?;

        let access = self.token_provider.generate_jwt(&identity.id, &profile.role)?;

        let refresh = self.token_provider.generate_refresh_token();
        let refresh_hash = self.token_provider.hash_refresh_token(&refresh)?;
        let now = Utc::now().timestamp();
        self.authentication_store
            .save_refresh_token_for_user(
                &self.db,
                &identity.id,
                &refresh_hash,
                now,
                self.token_provider.refresh_expiration_from(now),
            )
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %identity.id,
            role = %profile.role,
            "Login succeeded"
        );

        Ok(LoginResponse {
            user: profile.into(),
            access,
            refresh,
        })
    }

    /// Exchange a stored, unexpired refresh token for a new access JWT
    pub async fn refresh(
        &self,
        ctx: &RequestContext,
        refresh_token: &str,
    ) -> Result<RefreshResponse, InternalError> {
        let token_hash = self.token_provider.hash_refresh_token(refresh_token)?;
        let now = Utc::now().timestamp();

        let user_id = self
            .authentication_store
            .find_valid_refresh_token(&self.db, &token_hash, now)
            .await?
            .ok_or_else(|| CredentialError::invalid_token("refresh", "unknown or expired"))?;

        let profile = self
            .profile_store
            .find_by_user_id(&self.db, &user_id)
            .await?
            .ok_or_else(|| CredentialError::ProfileNotFound {
                user_id: user_id.clone(),
            })?;

        let access = self.token_provider.generate_jwt(&user_id, &profile.role)?;

        tracing::debug!(request_id = %ctx.request_id, user_id = %user_id, "Access token refreshed");

        Ok(RefreshResponse { access })
    }
}
