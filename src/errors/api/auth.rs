use crate::errors::internal::{CredentialError, InternalError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Authentication and password reset error types
///
/// Messages are deliberately generic so responses never reveal whether an
/// account exists or which part of a reset link was wrong.
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Invalid or expired refresh token
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// Identity has no profile
    #[oai(status = 404)]
    ProfileNotFound(Json<ErrorResponse>),

    /// Malformed request input
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Password reset link is invalid, expired or already used
    #[oai(status = 400)]
    InvalidResetLink(Json<ErrorResponse>),

    /// Reset email could not be dispatched
    #[oai(status = 500)]
    NotificationFailed(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse::new(
            "invalid_credentials",
            "Invalid credentials",
            401,
        )))
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorResponse::new(
            "invalid_token",
            "Token is invalid or expired",
            401,
        )))
    }

    pub fn profile_not_found() -> Self {
        AuthError::ProfileNotFound(Json(ErrorResponse::new(
            "profile_not_found",
            "Profile not found",
            404,
        )))
    }

    pub fn bad_request(field: &str, message: String) -> Self {
        AuthError::BadRequest(Json(
            ErrorResponse::new("validation_error", message, 400).with_field(field),
        ))
    }

    pub fn invalid_reset_link() -> Self {
        AuthError::InvalidResetLink(Json(ErrorResponse::new(
            "invalid_reset_link",
            "Invalid or expired reset link.",
            400,
        )))
    }

    pub fn notification_failed(message: String) -> Self {
        AuthError::NotificationFailed(Json(ErrorResponse::new(
            "notification_failed",
            message,
            500,
        )))
    }

    fn internal_server_error() -> Self {
        AuthError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Convert InternalError to AuthError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::ProfileNotFound { user_id }) => {
                tracing::warn!("Identity {} has no profile", user_id);
                Self::profile_not_found()
            }
            InternalError::Credential(CredentialError::InvalidToken { token_type, reason }) => {
                tracing::debug!("Invalid token: {} - {}", token_type, reason);
                Self::invalid_token()
            }
            InternalError::Credential(CredentialError::ExpiredToken(token_type)) => {
                tracing::debug!("Expired token: {}", token_type);
                Self::invalid_token()
            }
            InternalError::Credential(CredentialError::InvalidResetLink { reason }) => {
                tracing::debug!("Rejected password reset link: {}", reason);
                Self::invalid_reset_link()
            }
            InternalError::Validation(validation) => {
                tracing::debug!("Validation failed: {}", validation);
                Self::bad_request(validation.field(), validation.to_string())
            }
            InternalError::Notification(notification) => {
                tracing::error!("Notification dispatch failed: {}", notification);
                Self::notification_failed(notification.to_string())
            }
            _ => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Error body carried by every variant
    pub fn body(&self) -> &ErrorResponse {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::InvalidToken(json)
            | AuthError::ProfileNotFound(json)
            | AuthError::BadRequest(json)
            | AuthError::InvalidResetLink(json)
            | AuthError::NotificationFailed(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }

    pub fn message(&self) -> String {
        self.body().error.clone()
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
