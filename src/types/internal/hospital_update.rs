use crate::types::dto::hospital::{HospitalPatchRequest, HospitalPutRequest};

use super::patch::nullable;

/// Field changes applied to a hospital by PATCH or PUT
///
/// `None` leaves a field untouched; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HospitalUpdate {
    pub name: Option<String>,
    pub address: Option<Option<String>>,
    pub contact_email: Option<Option<String>>,
    pub contact_phone: Option<Option<String>>,
    pub active: Option<bool>,
}

impl HospitalUpdate {
    pub fn contact_email(email: Option<&str>) -> Self {
        Self {
            contact_email: Some(email.map(str::to_string)),
            ..Default::default()
        }
    }
}

impl From<HospitalPatchRequest> for HospitalUpdate {
    fn from(patch: HospitalPatchRequest) -> Self {
        Self {
            name: patch.name,
            address: nullable(patch.address),
            contact_email: nullable(patch.contact_email),
            contact_phone: nullable(patch.contact_phone),
            active: patch.active,
        }
    }
}

impl From<HospitalPutRequest> for HospitalUpdate {
    fn from(put: HospitalPutRequest) -> Self {
        Self {
            name: Some(put.name),
            address: Some(put.address),
            contact_email: Some(put.contact_email),
            contact_phone: Some(put.contact_phone),
            active: Some(put.active.unwrap_or(true)),
        }
    }
}
