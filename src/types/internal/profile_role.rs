use serde::{Deserialize, Serialize};

use crate::errors::internal::{InternalError, ValidationError};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HOSPITAL_ADMIN: &str = "hospital_admin";
pub const ROLE_DOCTOR: &str = "doctor";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_PATIENT: &str = "patient";

/// Doctor-specific profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorDetails {
    #[serde(default)]
    pub specialization: Option<String>,
}

/// Patient-specific profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientDetails {
    #[serde(default)]
    pub health_id: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<serde_json::Value>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
}

/// Role of a profile together with the fields only that role carries
///
/// Persisted as the `role` name column plus a JSON `role_details` column.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileRole {
    Admin,
    HospitalAdmin,
    Doctor(DoctorDetails),
    Staff,
    Patient(PatientDetails),
}

impl ProfileRole {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileRole::Admin => ROLE_ADMIN,
            ProfileRole::HospitalAdmin => ROLE_HOSPITAL_ADMIN,
            ProfileRole::Doctor(_) => ROLE_DOCTOR,
            ProfileRole::Staff => ROLE_STAFF,
            ProfileRole::Patient(_) => ROLE_PATIENT,
        }
    }

    /// Build a role from a request, ignoring payload fields the role does not carry
    pub fn from_parts(
        role: &str,
        doctor: DoctorDetails,
        patient: PatientDetails,
    ) -> Result<Self, ValidationError> {
        match role.trim() {
            ROLE_ADMIN => Ok(ProfileRole::Admin),
            ROLE_HOSPITAL_ADMIN => Ok(ProfileRole::HospitalAdmin),
            ROLE_DOCTOR => Ok(ProfileRole::Doctor(doctor)),
            ROLE_STAFF => Ok(ProfileRole::Staff),
            ROLE_PATIENT => Ok(ProfileRole::Patient(patient)),
            "" => Err(ValidationError::required("role")),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("\"{}\" is not a valid choice.", other),
            )),
        }
    }

    /// Rebuild a role from its stored columns
    pub fn from_columns(role: &str, details: Option<&str>) -> Result<Self, InternalError> {
        fn decode<T: Default + for<'de> Deserialize<'de>>(
            details: Option<&str>,
        ) -> Result<T, InternalError> {
            match details {
                Some(json) => serde_json::from_str(json)
                    .map_err(|e| InternalError::parse("role_details", e.to_string())),
                None => Ok(T::default()),
            }
        }

        match role {
            ROLE_ADMIN => Ok(ProfileRole::Admin),
            ROLE_HOSPITAL_ADMIN => Ok(ProfileRole::HospitalAdmin),
            ROLE_DOCTOR => Ok(ProfileRole::Doctor(decode(details)?)),
            ROLE_STAFF => Ok(ProfileRole::Staff),
            ROLE_PATIENT => Ok(ProfileRole::Patient(decode(details)?)),
            other => Err(InternalError::parse("role", format!("unknown role {}", other))),
        }
    }

    /// JSON for the `role_details` column; `None` for roles without a payload
    pub fn details_json(&self) -> Result<Option<String>, InternalError> {
        let encoded = match self {
            ProfileRole::Doctor(details) => serde_json::to_string(details),
            ProfileRole::Patient(details) => serde_json::to_string(details),
            _ => return Ok(None),
        };

        encoded
            .map(Some)
            .map_err(|e| InternalError::parse("role_details", e.to_string()))
    }

    /// Patient health ID, mirrored into its own unique column
    pub fn health_id(&self) -> Option<&str> {
        match self {
            ProfileRole::Patient(details) => details.health_id.as_deref(),
            _ => None,
        }
    }

    pub fn doctor(&self) -> Option<&DoctorDetails> {
        match self {
            ProfileRole::Doctor(details) => Some(details),
            _ => None,
        }
    }

    pub fn patient(&self) -> Option<&PatientDetails> {
        match self {
            ProfileRole::Patient(details) => Some(details),
            _ => None,
        }
    }
}
