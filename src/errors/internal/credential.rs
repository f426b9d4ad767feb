use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown email and wrong password deliberately share this variant
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Profile not found for user: {user_id}")]
    ProfileNotFound { user_id: String },

    #[error("Invalid token: {token_type} - {reason}")]
    InvalidToken { token_type: String, reason: String },

    #[error("Expired token: {0}")]
    ExpiredToken(String),

    /// Covers undecodable uid, unknown identity, bad signature, expiry and reuse
    #[error("Invalid password reset link: {reason}")]
    InvalidResetLink { reason: String },
}

impl CredentialError {
    pub fn invalid_token(token_type: &str, reason: &str) -> Self {
        Self::InvalidToken {
            token_type: token_type.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_reset_link(reason: impl Into<String>) -> Self {
        Self::InvalidResetLink {
            reason: reason.into(),
        }
    }
}
