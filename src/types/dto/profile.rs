use poem_openapi::{ApiResponse, Object, payload::Json, types::MaybeUndefined};
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::types::db::profile;
use crate::types::internal::ProfileRole;

/// Profile record with role-specific fields flattened
///
/// Fields a role does not carry are null (or empty lists).
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    /// Linked login identity, if the person can log in
    pub user_id: Option<String>,
    pub role: String,
    pub hospital_id: Option<String>,
    pub department_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub is_active: bool,
    /// YYYY-MM-DD
    pub join_date: String,

    pub specialization: Option<String>,

    pub health_id: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<serde_json::Value>,
    pub allergies: Vec<String>,
    pub chronic_conditions: Vec<String>,

    /// Profile that registered this one
    pub registered_by: Option<String>,
    pub created_at: i64,
}

impl TryFrom<profile::Model> for ProfileResponse {
    type Error = InternalError;

    fn try_from(model: profile::Model) -> Result<Self, Self::Error> {
        let role = ProfileRole::from_columns(&model.role, model.role_details.as_deref())?;
        let doctor = role.doctor().cloned().unwrap_or_default();
        let patient = role.patient().cloned().unwrap_or_default();

        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            role: model.role,
            hospital_id: model.hospital_id,
            department_id: model.department_id,
            full_name: model.full_name,
            email: model.email,
            contact_number: model.contact_number,
            is_active: model.is_active,
            join_date: model.join_date,
            specialization: doctor.specialization,
            health_id: patient.health_id,
            age: patient.age,
            gender: patient.gender,
            blood_group: patient.blood_group,
            address: patient.address,
            emergency_contact: patient.emergency_contact,
            allergies: patient.allergies,
            chronic_conditions: patient.chronic_conditions,
            registered_by: model.registered_by,
            created_at: model.created_at,
        })
    }
}

/// Profile body for create and full update
#[derive(Object, Debug, Default)]
pub struct ProfileRequest {
    /// admin, hospital_admin, doctor, staff or patient
    pub role: String,
    pub user_id: Option<String>,
    pub hospital_id: Option<String>,
    pub department_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,

    /// Doctor only
    pub specialization: Option<String>,

    /// Patient only
    pub health_id: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<serde_json::Value>,
    pub allergies: Option<Vec<String>>,
    pub chronic_conditions: Option<Vec<String>>,

    pub registered_by: Option<String>,
}

#[derive(Object, Debug, Default)]
pub struct ProfilePatchRequest {
    pub role: Option<String>,
    pub user_id: MaybeUndefined<String>,
    pub hospital_id: MaybeUndefined<String>,
    pub department_id: MaybeUndefined<String>,
    pub full_name: MaybeUndefined<String>,
    pub email: MaybeUndefined<String>,
    pub contact_number: MaybeUndefined<String>,
    pub is_active: Option<bool>,

    pub specialization: MaybeUndefined<String>,

    pub health_id: MaybeUndefined<String>,
    pub age: MaybeUndefined<i32>,
    pub gender: MaybeUndefined<String>,
    pub blood_group: MaybeUndefined<String>,
    pub address: MaybeUndefined<String>,
    pub emergency_contact: MaybeUndefined<serde_json::Value>,
    pub allergies: Option<Vec<String>>,
    pub chronic_conditions: Option<Vec<String>>,

    pub registered_by: MaybeUndefined<String>,
}

#[derive(ApiResponse)]
pub enum ProfileCreatedResponse {
    #[oai(status = 201)]
    Created(Json<ProfileResponse>),
}
