use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Raised by the pre-check and by a unique violation during insert or commit
    #[error("A user with this email already exists")]
    IdentityExists { email: String },
}
