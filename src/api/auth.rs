use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::{LoginCoordinator, PasswordResetCoordinator};
use crate::errors::AuthError;
use crate::providers::TokenProvider;
use crate::types::dto::auth::{
    LoginRequest, LoginResponse, PasswordResetConfirmRequest, PasswordResetRequest, RefreshRequest,
    RefreshResponse,
};
use crate::types::dto::common::MessageResponse;

/// Authentication API endpoints
pub struct AuthApi {
    login_coordinator: LoginCoordinator,
    password_reset_coordinator: PasswordResetCoordinator,
    token_provider: Arc<TokenProvider>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            login_coordinator: LoginCoordinator::new(Arc::clone(&app_data)),
            password_reset_coordinator: PasswordResetCoordinator::new(app_data),
        }
    }
}

impl Api for AuthApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Login and token refresh
    Authentication,
    /// Forgotten password flow
    PasswordReset,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email and password
    ///
    /// Returns the caller's profile with an access JWT and a refresh token.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<LoginResponse>, AuthError> {
        let ctx = self.request_context(req);
        let response = self
            .login_coordinator
            .login(&ctx, &body.email, &body.password)
            .await?;
        Ok(Json(response))
    }

    /// Exchange a refresh token for a new access token
    #[oai(path = "/refresh", method = "post", tag = "AuthTags::Authentication")]
    async fn refresh(&self, req: &Request, body: Json<RefreshRequest>) -> Result<Json<RefreshResponse>, AuthError> {
        let ctx = self.request_context(req);
        let response = self.login_coordinator.refresh(&ctx, &body.refresh).await?;
        Ok(Json(response))
    }

    /// Request a password reset link
    ///
    /// Always answers with the same message whether or not the email is registered.
    #[oai(path = "/password-reset/request", method = "post", tag = "AuthTags::PasswordReset")]
    async fn request_password_reset(
        &self,
        req: &Request,
        body: Json<PasswordResetRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        let ctx = self.request_context(req);
        let response = self
            .password_reset_coordinator
            .request_reset(&ctx, &body.email)
            .await?;
        Ok(Json(response))
    }

    /// Set a new password using the link from the reset email
    #[oai(path = "/password-reset/confirm", method = "post", tag = "AuthTags::PasswordReset")]
    async fn confirm_password_reset(
        &self,
        req: &Request,
        body: Json<PasswordResetConfirmRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        let ctx = self.request_context(req);
        let response = self
            .password_reset_coordinator
            .confirm_reset(&ctx, &body.uidb64, &body.token, &body.new_password)
            .await?;
        Ok(Json(response))
    }
}
