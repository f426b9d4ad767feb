// Resources - table-backed records exposed through generic CRUD
//
// Each resource describes how request bodies become active models. Storage
// and orchestration are shared (`RecordStore`, `RecordCoordinator`).
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait, IntoActiveModel};

use crate::errors::InternalError;
use crate::errors::internal::ValidationError;

pub mod analytics;
pub mod clinical;
pub mod department;
pub mod profile;

pub use analytics::AnalyticsResource;
pub use clinical::{LabReportResource, PrescriptionResource, VaccinationResource, VisitResource};
pub use department::DepartmentResource;
pub use profile::ProfileResource;

/// A table that is exposed as list/retrieve/create/replace/patch/delete
pub trait Resource: Send + Sync + 'static {
    /// Human-readable name used in "not found" messages
    const ENTITY_NAME: &'static str;

    type Entity: EntityTrait<Model = Self::Model, ActiveModel = Self::ActiveModel>;
    type Model: IntoActiveModel<Self::ActiveModel> + Clone + Send + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync;

    /// Body accepted by create (POST) and full update (PUT)
    type Request: Send;
    /// Body accepted by partial update (PATCH)
    type Patch: Send;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// Column used to order listings, newest first
    fn created_column() -> <Self::Entity as EntityTrait>::Column;

    fn create(request: Self::Request, now: DateTime<Utc>) -> Result<Self::ActiveModel, InternalError>;

    /// Overwrite every writable field of `existing`
    fn replace(existing: Self::Model, request: Self::Request) -> Result<Self::ActiveModel, InternalError>;

    /// Overwrite only the fields present in `patch`
    fn patch(existing: Self::Model, patch: Self::Patch) -> Result<Self::ActiveModel, InternalError>;
}

pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current date as `YYYY-MM-DD`
pub fn today(now: DateTime<Utc>) -> String {
    now.date_naive().format("%Y-%m-%d").to_string()
}

/// Reject blank text for a NOT NULL column; returns the trimmed value
pub fn required_text(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(trimmed.to_string())
}

/// Validate an ISO calendar date (`YYYY-MM-DD`)
pub fn validate_date(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        ValidationError::invalid_format(
            field,
            "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
        )
    })?;
    Ok(trimmed.to_string())
}

pub fn validate_optional_date(field: &str, value: Option<String>) -> Result<Option<String>, ValidationError> {
    value.map(|v| validate_date(field, v)).transpose()
}
