use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::profile;

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address the account was registered with
    pub email: String,

    /// Account password
    pub password: String,
}

/// Profile summary returned on login
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    /// Profile ID (UUID)
    pub id: String,

    /// Role name (admin, hospital_admin, doctor, staff, patient)
    pub role: String,

    pub full_name: Option<String>,

    pub email: Option<String>,

    pub hospital_id: Option<String>,

    pub department_id: Option<String>,
}

impl From<profile::Model> for UserProfileResponse {
    fn from(model: profile::Model) -> Self {
        Self {
            id: model.id,
            role: model.role,
            full_name: model.full_name,
            email: model.email,
            hospital_id: model.hospital_id,
            department_id: model.department_id,
        }
    }
}

/// Response model for a successful login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Profile of the authenticated identity
    pub user: UserProfileResponse,

    /// JWT access token
    pub access: String,

    /// Refresh token for obtaining new access tokens
    pub refresh: String,
}

/// Request model for token refresh
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token issued at login
    pub refresh: String,
}

/// Response model for token refresh
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New JWT access token
    pub access: String,
}

/// Request model for starting a password reset
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Request model for completing a password reset
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PasswordResetConfirmRequest {
    /// URL-safe base64 encoded identity ID from the reset link
    pub uidb64: String,

    /// Reset token from the reset link
    pub token: String,

    /// New password (at least 8 characters)
    pub new_password: String,
}
