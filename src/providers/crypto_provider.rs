use std::fmt;
use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use hmac::{Hmac, Mac};
use rand::{Rng, TryRngCore, rngs::OsRng};
use sha2::Sha256;

use crate::config::SecretManager;
use crate::errors::InternalError;

type HmacSha256 = Hmac<Sha256>;

/// Character set for generated temporary passwords
const TEMP_PASSWORD_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                       abcdefghijklmnopqrstuvwxyz\
                                       0123456789";

/// Cryptographic operations provider
///
/// Password hashing (Argon2id with the configured pepper as secret),
/// HMAC-SHA256 and random password generation.
pub struct CryptoProvider {
    secret_manager: Arc<SecretManager>,
}

impl CryptoProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.secret_manager.password_pepper().as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a password into a PHC string
    ///
    /// # Arguments
    /// * `password` - The plaintext password
    ///
    /// # Returns
    /// * `Ok(String)` - `$argon2id$...` encoded hash with a fresh salt
    /// * `Err(InternalError)` - Argon2 could not be initialised or failed
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
            .to_string();

        Ok(hash)
    }

    /// Verify a password against a stored PHC hash
    ///
    /// A malformed stored hash counts as a mismatch so callers can keep a
    /// single failure path.
    pub fn verify_password(&self, password_hash: &str, password: &str) -> Result<bool, InternalError> {
        let parsed_hash = match PasswordHash::new(password_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                return Ok(false);
            }
        };

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Spend roughly the cost of one verification without a stored hash
    ///
    /// Used when the identity does not exist so response timing does not
    /// reveal which emails are registered.
    pub fn burn_verification(&self, password: &str) {
        if let Err(e) = self.hash_password(password) {
            tracing::debug!("Timing equalisation hash failed: {}", e);
        }
    }

    /// Compute HMAC-SHA256 and return raw bytes
    pub fn hmac_sha256(&self, key: &str, data: &[u8]) -> Result<Vec<u8>, InternalError> {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| InternalError::crypto("hmac_init", e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Check an HMAC-SHA256 tag in constant time
    pub fn verify_hmac_sha256(&self, key: &str, data: &[u8], tag: &[u8]) -> Result<bool, InternalError> {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| InternalError::crypto("hmac_init", e.to_string()))?;
        mac.update(data);
        Ok(mac.verify_slice(tag).is_ok())
    }

    /// Compute HMAC-SHA256 for refresh tokens and return as hexadecimal string
    ///
    /// # Arguments
    /// * `key` - The secret key for HMAC computation
    /// * `token` - The token to hash
    pub fn hmac_sha256_token(&self, key: &str, token: &str) -> Result<String, InternalError> {
        let digest = self.hmac_sha256(key, token.as_bytes())?;
        Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
    }

    /// Generate a temporary password from `[A-Za-z0-9]` using the OS random source
    pub fn generate_temp_password(&self, length: usize) -> String {
        let mut rng = OsRng.unwrap_err();
        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..TEMP_PASSWORD_CHARSET.len());
                TEMP_PASSWORD_CHARSET[idx] as char
            })
            .collect()
    }
}

impl fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoProvider")
            .field("secret_manager", &"<redacted>")
            .finish()
    }
}
