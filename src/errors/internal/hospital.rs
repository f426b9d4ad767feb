use thiserror::Error;

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("A user with this email already exists.")]
    ContactEmailTaken { email: String },

    #[error("Contact email cannot be cleared while hospital admins are linked to this hospital.")]
    ContactEmailRequired { hospital_id: String },
}

impl HospitalError {
    /// Request field the error is reported against
    pub fn field(&self) -> &'static str {
        match self {
            HospitalError::ContactEmailTaken { .. } => "contact_email",
            HospitalError::ContactEmailRequired { .. } => "contact_email",
        }
    }
}
