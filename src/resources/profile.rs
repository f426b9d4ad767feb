use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};

use crate::errors::InternalError;
use crate::types::db::profile;
use crate::types::dto::profile::{ProfilePatchRequest, ProfileRequest};
use crate::types::internal::patch::nullable;
use crate::types::internal::{DoctorDetails, EmailAddress, PatientDetails, ProfileRole};

use super::{Resource, new_record_id, today};

/// Profiles managed directly (outside registration)
///
/// No identity is created or updated here; `user_id` only links to an existing one.
pub struct ProfileResource;

fn role_from_request(request: &mut ProfileRequest) -> Result<ProfileRole, InternalError> {
    let doctor = DoctorDetails {
        specialization: request.specialization.take(),
    };
    let patient = PatientDetails {
        health_id: request.health_id.take().filter(|id| !id.trim().is_empty()),
        age: request.age.take(),
        gender: request.gender.take(),
        blood_group: request.blood_group.take(),
        address: request.address.take(),
        emergency_contact: request.emergency_contact.take(),
        allergies: request.allergies.take().unwrap_or_default(),
        chronic_conditions: request.chronic_conditions.take().unwrap_or_default(),
    };

    Ok(ProfileRole::from_parts(&request.role, doctor, patient)?)
}

fn parse_email(email: Option<String>) -> Result<Option<String>, InternalError> {
    Ok(EmailAddress::parse_optional("email", email.as_deref())?.map(EmailAddress::into_inner))
}

fn apply_role(active: &mut profile::ActiveModel, role: &ProfileRole) -> Result<(), InternalError> {
    active.role = Set(role.name().to_string());
    active.role_details = Set(role.details_json()?);
    active.health_id = Set(role.health_id().map(str::to_string));
    Ok(())
}

impl Resource for ProfileResource {
    const ENTITY_NAME: &'static str = "Profile";

    type Entity = profile::Entity;
    type Model = profile::Model;
    type ActiveModel = profile::ActiveModel;
    type Request = ProfileRequest;
    type Patch = ProfilePatchRequest;

    fn id_column() -> profile::Column {
        profile::Column::Id
    }

    fn created_column() -> profile::Column {
        profile::Column::CreatedAt
    }

    fn create(mut request: ProfileRequest, now: DateTime<Utc>) -> Result<profile::ActiveModel, InternalError> {
        let role = role_from_request(&mut request)?;
        let id = request.user_id.clone().unwrap_or_else(new_record_id);

        let mut active = profile::ActiveModel {
            id: Set(id),
            user_id: Set(request.user_id),
            hospital_id: Set(request.hospital_id),
            department_id: Set(request.department_id),
            full_name: Set(request.full_name),
            email: Set(parse_email(request.email)?),
            contact_number: Set(request.contact_number),
            is_active: Set(request.is_active.unwrap_or(true)),
            join_date: Set(today(now)),
            registered_by: Set(request.registered_by),
            created_at: Set(now.timestamp()),
            ..Default::default()
        };
        apply_role(&mut active, &role)?;
        Ok(active)
    }

    fn replace(existing: profile::Model, mut request: ProfileRequest) -> Result<profile::ActiveModel, InternalError> {
        let role = role_from_request(&mut request)?;

        let mut active = existing.into_active_model();
        active.user_id = Set(request.user_id);
        active.hospital_id = Set(request.hospital_id);
        active.department_id = Set(request.department_id);
        active.full_name = Set(request.full_name);
        active.email = Set(parse_email(request.email)?);
        active.contact_number = Set(request.contact_number);
        active.is_active = Set(request.is_active.unwrap_or(true));
        active.registered_by = Set(request.registered_by);
        apply_role(&mut active, &role)?;
        Ok(active)
    }

    fn patch(existing: profile::Model, patch: ProfilePatchRequest) -> Result<profile::ActiveModel, InternalError> {
        let current = ProfileRole::from_columns(&existing.role, existing.role_details.as_deref())?;
        let mut doctor = current.doctor().cloned().unwrap_or_default();
        let mut patient = current.patient().cloned().unwrap_or_default();
        let role_name = patch.role.unwrap_or_else(|| existing.role.clone());

        if let Some(specialization) = nullable(patch.specialization) {
            doctor.specialization = specialization;
        }
        if let Some(health_id) = nullable(patch.health_id) {
            patient.health_id = health_id.filter(|id| !id.trim().is_empty());
        }
        if let Some(age) = nullable(patch.age) {
            patient.age = age;
        }
        if let Some(gender) = nullable(patch.gender) {
            patient.gender = gender;
        }
        if let Some(blood_group) = nullable(patch.blood_group) {
            patient.blood_group = blood_group;
        }
        if let Some(address) = nullable(patch.address) {
            patient.address = address;
        }
        if let Some(emergency_contact) = nullable(patch.emergency_contact) {
            patient.emergency_contact = emergency_contact;
        }
        if let Some(allergies) = patch.allergies {
            patient.allergies = allergies;
        }
        if let Some(chronic_conditions) = patch.chronic_conditions {
            patient.chronic_conditions = chronic_conditions;
        }
        let role = ProfileRole::from_parts(&role_name, doctor, patient)?;

        let mut active = existing.into_active_model();
        if let Some(user_id) = nullable(patch.user_id) {
            active.user_id = Set(user_id);
        }
        if let Some(hospital_id) = nullable(patch.hospital_id) {
            active.hospital_id = Set(hospital_id);
        }
        if let Some(department_id) = nullable(patch.department_id) {
            active.department_id = Set(department_id);
        }
        if let Some(full_name) = nullable(patch.full_name) {
            active.full_name = Set(full_name);
        }
        if let Some(email) = nullable(patch.email) {
            active.email = Set(parse_email(email)?);
        }
        if let Some(contact_number) = nullable(patch.contact_number) {
            active.contact_number = Set(contact_number);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(registered_by) = nullable(patch.registered_by) {
            active.registered_by = Set(registered_by);
        }
        apply_role(&mut active, &role)?;
        Ok(active)
    }
}
