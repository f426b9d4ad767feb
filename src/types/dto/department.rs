use poem_openapi::{ApiResponse, Object, payload::Json, types::MaybeUndefined};
use serde::{Deserialize, Serialize};

use crate::types::db::department;

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentResponse {
    /// Client-assigned department ID
    pub id: String,

    pub hospital_id: String,

    pub name: String,

    pub head_name: Option<String>,

    pub doctor_count: i32,

    pub staff_count: i32,

    pub status: String,

    pub created_at: i64,
}

impl From<department::Model> for DepartmentResponse {
    fn from(model: department::Model) -> Self {
        Self {
            id: model.id,
            hospital_id: model.hospital_id,
            name: model.name,
            head_name: model.head_name,
            doctor_count: model.doctor_count,
            staff_count: model.staff_count,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

/// Department body for create and full update
#[derive(Object, Debug, Default)]
pub struct DepartmentRequest {
    /// Department ID; generated when omitted on create
    pub id: Option<String>,

    pub hospital_id: String,

    pub name: String,

    pub head_name: Option<String>,

    /// Defaults to 0
    pub doctor_count: Option<i32>,

    /// Defaults to 0
    pub staff_count: Option<i32>,

    /// Defaults to "Active"
    pub status: Option<String>,
}

#[derive(Object, Debug, Default)]
pub struct DepartmentPatchRequest {
    pub hospital_id: Option<String>,

    pub name: Option<String>,

    pub head_name: MaybeUndefined<String>,

    pub doctor_count: Option<i32>,

    pub staff_count: Option<i32>,

    pub status: Option<String>,
}

#[derive(ApiResponse)]
pub enum DepartmentCreatedResponse {
    #[oai(status = 201)]
    Created(Json<DepartmentResponse>),
}
