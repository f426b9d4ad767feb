use std::fmt;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::config::{ApplicationSettings, SecretManager};
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::CryptoProvider;
use crate::types::db::user;

/// Issues and checks password reset tokens
///
/// A token is `{issued_at hex}-{base64url(HMAC-SHA256(secret, id|password_hash|issued_at))}`.
/// Because the current password hash is signed, a token stops verifying as
/// soon as the password changes, which makes it single-use without storage.
pub struct ResetTokenProvider {
    secret_manager: Arc<SecretManager>,
    crypto_provider: Arc<CryptoProvider>,
    ttl_seconds: i64,
}

impl ResetTokenProvider {
    pub fn new(
        secret_manager: Arc<SecretManager>,
        crypto_provider: Arc<CryptoProvider>,
        settings: &ApplicationSettings,
    ) -> Self {
        Self {
            secret_manager,
            crypto_provider,
            ttl_seconds: settings.password_reset_ttl().as_secs() as i64,
        }
    }

    /// Encode an identity ID for the `uidb64` link parameter
    pub fn encode_uid(&self, user_id: &str) -> String {
        URL_SAFE_NO_PAD.encode(user_id.as_bytes())
    }

    /// Decode a `uidb64` link parameter back into an identity ID
    pub fn decode_uid(&self, uidb64: &str) -> Result<String, InternalError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(uidb64.trim().trim_end_matches('='))
            .map_err(|_| CredentialError::invalid_reset_link("uidb64 is not base64url"))?;

        String::from_utf8(bytes)
            .map_err(|_| CredentialError::invalid_reset_link("uidb64 is not UTF-8").into())
    }

    fn payload(identity: &user::Model, issued_at: i64) -> String {
        format!("{}|{}|{}", identity.id, identity.password_hash, issued_at)
    }

    /// Issue a token for the identity at time `now`
    pub fn make_token(&self, identity: &user::Model, now: i64) -> Result<String, InternalError> {
        let signature = self.crypto_provider.hmac_sha256(
            self.secret_manager.reset_token_secret(),
            Self::payload(identity, now).as_bytes(),
        )?;

        Ok(format!("{:x}-{}", now, URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Check a token for the identity at time `now`
    ///
    /// Every failure is reported as `CredentialError::InvalidResetLink`; the
    /// reason is only for logs.
    pub fn check_token(&self, identity: &user::Model, token: &str, now: i64) -> Result<(), InternalError> {
        let (issued_hex, signature_b64) = token
            .split_once('-')
            .ok_or_else(|| CredentialError::invalid_reset_link("token has no separator"))?;

        let issued_at = i64::from_str_radix(issued_hex, 16)
            .map_err(|_| CredentialError::invalid_reset_link("issued_at is not hex"))?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| CredentialError::invalid_reset_link("signature is not base64url"))?;

        let valid = self.crypto_provider.verify_hmac_sha256(
            self.secret_manager.reset_token_secret(),
            Self::payload(identity, issued_at).as_bytes(),
            &signature,
        )?;
        if !valid {
            return Err(CredentialError::invalid_reset_link("signature mismatch").into());
        }

        if issued_at > now {
            return Err(CredentialError::invalid_reset_link("issued in the future").into());
        }

        if now - issued_at > self.ttl_seconds {
            return Err(CredentialError::invalid_reset_link("expired").into());
        }

        Ok(())
    }

    /// Build the link delivered to the user
    ///
    /// Both parameters only use URL-safe characters, so no escaping is needed.
    pub fn build_reset_link(&self, base_url: &str, uidb64: &str, token: &str) -> String {
        format!("{}?uidb64={}&token={}", base_url, uidb64, token)
    }
}

impl fmt::Debug for ResetTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetTokenProvider")
            .field("secret_manager", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}
