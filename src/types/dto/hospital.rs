use poem_openapi::{ApiResponse, Object, payload::Json, types::MaybeUndefined};
use serde::{Deserialize, Serialize};

use crate::types::db::hospital;

/// Hospital record
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct HospitalResponse {
    /// Hospital ID (UUID)
    pub id: String,

    pub name: String,

    pub address: Option<String>,

    /// Notification address of the hospital authority
    pub contact_email: Option<String>,

    pub contact_phone: Option<String>,

    pub active: bool,

    /// Creation time (Unix timestamp)
    pub created_at: i64,
}

impl From<hospital::Model> for HospitalResponse {
    fn from(model: hospital::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            active: model.active,
            created_at: model.created_at,
        }
    }
}

/// Request model for hospital registration
///
/// Every field is optional at the wire level so that missing values are
/// reported with field-named validation errors.
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct HospitalRegistrationRequest {
    /// Hospital name
    pub name: Option<String>,

    pub address: Option<String>,

    /// Contact email; also becomes the admin login
    pub email: Option<String>,

    /// Contact phone
    pub phone: Option<String>,
}

/// Response model for a successful registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisteredHospitalResponse {
    pub hospital: HospitalResponse,

    /// Login of the created hospital admin
    pub email: String,

    /// Temporary password, shown exactly once
    pub temp_password: String,

    pub message: String,
}

/// API response for the registration endpoint
#[derive(ApiResponse)]
pub enum RegisterHospitalApiResponse {
    /// Hospital, admin identity and admin profile created
    #[oai(status = 201)]
    Created(Json<RegisteredHospitalResponse>),
}

/// Partial hospital update; absent fields are left untouched
#[derive(Object, Debug, Default)]
pub struct HospitalPatchRequest {
    pub name: Option<String>,

    pub address: MaybeUndefined<String>,

    pub contact_email: MaybeUndefined<String>,

    pub contact_phone: MaybeUndefined<String>,

    pub active: Option<bool>,
}

/// Full hospital update; absent optional fields are cleared
#[derive(Object, Debug, Default)]
pub struct HospitalPutRequest {
    pub name: String,

    pub address: Option<String>,

    pub contact_email: Option<String>,

    pub contact_phone: Option<String>,

    /// Defaults to true
    pub active: Option<bool>,
}

/// Platform-wide counters
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatsResponse {
    pub hospitals: u64,

    /// Profiles whose role is not admin
    #[oai(rename = "totalUsers")]
    #[serde(rename = "totalUsers")]
    pub total_users: u64,

    pub doctors: u64,

    pub staff: u64,

    pub patients: u64,
}
