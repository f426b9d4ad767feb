use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};

use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::types::db::department;
use crate::types::dto::department::{DepartmentPatchRequest, DepartmentRequest};
use crate::types::internal::patch::nullable;

use super::{Resource, new_record_id, required_text};

const DEFAULT_STATUS: &str = "Active";

pub struct DepartmentResource;

impl Resource for DepartmentResource {
    const ENTITY_NAME: &'static str = "Department";

    type Entity = department::Entity;
    type Model = department::Model;
    type ActiveModel = department::ActiveModel;
    type Request = DepartmentRequest;
    type Patch = DepartmentPatchRequest;

    fn id_column() -> department::Column {
        department::Column::Id
    }

    fn created_column() -> department::Column {
        department::Column::CreatedAt
    }

    fn create(request: DepartmentRequest, now: DateTime<Utc>) -> Result<department::ActiveModel, InternalError> {
        let id = match request.id {
            Some(id) => required_text("id", id)?,
            None => new_record_id(),
        };

        Ok(department::ActiveModel {
            id: Set(id),
            hospital_id: Set(required_text("hospital_id", request.hospital_id)?),
            name: Set(required_text("name", request.name)?),
            head_name: Set(request.head_name),
            doctor_count: Set(request.doctor_count.unwrap_or(0)),
            staff_count: Set(request.staff_count.unwrap_or(0)),
            status: Set(request.status.unwrap_or_else(|| DEFAULT_STATUS.to_string())),
            created_at: Set(now.timestamp()),
        })
    }

    fn replace(existing: department::Model, request: DepartmentRequest) -> Result<department::ActiveModel, InternalError> {
        if let Some(id) = request.id.as_deref() {
            if id.trim() != existing.id {
                return Err(ValidationError::invalid_format("id", "Department ID cannot be changed.").into());
            }
        }

        let mut active = existing.into_active_model();
        active.hospital_id = Set(required_text("hospital_id", request.hospital_id)?);
        active.name = Set(required_text("name", request.name)?);
        active.head_name = Set(request.head_name);
        active.doctor_count = Set(request.doctor_count.unwrap_or(0));
        active.staff_count = Set(request.staff_count.unwrap_or(0));
        active.status = Set(request.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()));
        Ok(active)
    }

    fn patch(existing: department::Model, patch: DepartmentPatchRequest) -> Result<department::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        if let Some(hospital_id) = patch.hospital_id {
            active.hospital_id = Set(required_text("hospital_id", hospital_id)?);
        }
        if let Some(name) = patch.name {
            active.name = Set(required_text("name", name)?);
        }
        if let Some(head_name) = nullable(patch.head_name) {
            active.head_name = Set(head_name);
        }
        if let Some(doctor_count) = patch.doctor_count {
            active.doctor_count = Set(doctor_count);
        }
        if let Some(staff_count) = patch.staff_count {
            active.staff_count = Set(staff_count);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        Ok(active)
    }
}
