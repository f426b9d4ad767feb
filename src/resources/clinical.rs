use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};

use crate::errors::InternalError;
use crate::types::db::{lab_report, prescription, vaccination, visit};
use crate::types::dto::clinical::{
    LabReportPatchRequest, LabReportRequest, PrescriptionPatchRequest, PrescriptionRequest,
    VaccinationPatchRequest, VaccinationRequest, VisitPatchRequest, VisitRequest,
};
use crate::types::internal::patch::nullable;

use super::{Resource, new_record_id, required_text, today, validate_date, validate_optional_date};

const PRESCRIPTION_DEFAULT_STATUS: &str = "Active";
const LAB_REPORT_DEFAULT_STATUS: &str = "Normal";

pub struct VisitResource;

impl Resource for VisitResource {
    const ENTITY_NAME: &'static str = "Visit";

    type Entity = visit::Entity;
    type Model = visit::Model;
    type ActiveModel = visit::ActiveModel;
    type Request = VisitRequest;
    type Patch = VisitPatchRequest;

    fn id_column() -> visit::Column {
        visit::Column::Id
    }

    fn created_column() -> visit::Column {
        visit::Column::VisitDate
    }

    fn create(request: VisitRequest, now: DateTime<Utc>) -> Result<visit::ActiveModel, InternalError> {
        Ok(visit::ActiveModel {
            id: Set(new_record_id()),
            hospital_id: Set(required_text("hospital_id", request.hospital_id)?),
            patient_id: Set(required_text("patient_id", request.patient_id)?),
            doctor_id: Set(required_text("doctor_id", request.doctor_id)?),
            diagnosis: Set(required_text("diagnosis", request.diagnosis)?),
            prescription_text: Set(request.prescription_text),
            clinical_notes: Set(request.clinical_notes),
            visit_date: Set(now.timestamp()),
            next_visit_date: Set(validate_optional_date("next_visit_date", request.next_visit_date)?),
            created_at: Set(now.timestamp()),
        })
    }

    fn replace(existing: visit::Model, request: VisitRequest) -> Result<visit::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        active.hospital_id = Set(required_text("hospital_id", request.hospital_id)?);
        active.patient_id = Set(required_text("patient_id", request.patient_id)?);
        active.doctor_id = Set(required_text("doctor_id", request.doctor_id)?);
        active.diagnosis = Set(required_text("diagnosis", request.diagnosis)?);
        active.prescription_text = Set(request.prescription_text);
        active.clinical_notes = Set(request.clinical_notes);
        active.next_visit_date = Set(validate_optional_date("next_visit_date", request.next_visit_date)?);
        Ok(active)
    }

    fn patch(existing: visit::Model, patch: VisitPatchRequest) -> Result<visit::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        if let Some(hospital_id) = patch.hospital_id {
            active.hospital_id = Set(required_text("hospital_id", hospital_id)?);
        }
        if let Some(patient_id) = patch.patient_id {
            active.patient_id = Set(required_text("patient_id", patient_id)?);
        }
        if let Some(doctor_id) = patch.doctor_id {
            active.doctor_id = Set(required_text("doctor_id", doctor_id)?);
        }
        if let Some(diagnosis) = patch.diagnosis {
            active.diagnosis = Set(required_text("diagnosis", diagnosis)?);
        }
        if let Some(text) = nullable(patch.prescription_text) {
            active.prescription_text = Set(text);
        }
        if let Some(notes) = nullable(patch.clinical_notes) {
            active.clinical_notes = Set(notes);
        }
        if let Some(date) = nullable(patch.next_visit_date) {
            active.next_visit_date = Set(validate_optional_date("next_visit_date", date)?);
        }
        Ok(active)
    }
}

pub struct PrescriptionResource;

impl Resource for PrescriptionResource {
    const ENTITY_NAME: &'static str = "Prescription";

    type Entity = prescription::Entity;
    type Model = prescription::Model;
    type ActiveModel = prescription::ActiveModel;
    type Request = PrescriptionRequest;
    type Patch = PrescriptionPatchRequest;

    fn id_column() -> prescription::Column {
        prescription::Column::Id
    }

    fn created_column() -> prescription::Column {
        prescription::Column::CreatedAt
    }

    fn create(request: PrescriptionRequest, now: DateTime<Utc>) -> Result<prescription::ActiveModel, InternalError> {
        Ok(prescription::ActiveModel {
            id: Set(new_record_id()),
            visit_id: Set(request.visit_id),
            patient_id: Set(required_text("patient_id", request.patient_id)?),
            doctor_id: Set(request.doctor_id),
            medicine_name: Set(required_text("medicine_name", request.medicine_name)?),
            dosage: Set(request.dosage),
            duration: Set(request.duration),
            status: Set(request.status.unwrap_or_else(|| PRESCRIPTION_DEFAULT_STATUS.to_string())),
            created_at: Set(now.timestamp()),
        })
    }

    fn replace(existing: prescription::Model, request: PrescriptionRequest) -> Result<prescription::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        active.visit_id = Set(request.visit_id);
        active.patient_id = Set(required_text("patient_id", request.patient_id)?);
        active.doctor_id = Set(request.doctor_id);
        active.medicine_name = Set(required_text("medicine_name", request.medicine_name)?);
        active.dosage = Set(request.dosage);
        active.duration = Set(request.duration);
        active.status = Set(request.status.unwrap_or_else(|| PRESCRIPTION_DEFAULT_STATUS.to_string()));
        Ok(active)
    }

    fn patch(existing: prescription::Model, patch: PrescriptionPatchRequest) -> Result<prescription::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        if let Some(visit_id) = nullable(patch.visit_id) {
            active.visit_id = Set(visit_id);
        }
        if let Some(patient_id) = patch.patient_id {
            active.patient_id = Set(required_text("patient_id", patient_id)?);
        }
        if let Some(doctor_id) = nullable(patch.doctor_id) {
            active.doctor_id = Set(doctor_id);
        }
        if let Some(medicine_name) = patch.medicine_name {
            active.medicine_name = Set(required_text("medicine_name", medicine_name)?);
        }
        if let Some(dosage) = nullable(patch.dosage) {
            active.dosage = Set(dosage);
        }
        if let Some(duration) = nullable(patch.duration) {
            active.duration = Set(duration);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        Ok(active)
    }
}

pub struct LabReportResource;

impl Resource for LabReportResource {
    const ENTITY_NAME: &'static str = "Lab report";

    type Entity = lab_report::Entity;
    type Model = lab_report::Model;
    type ActiveModel = lab_report::ActiveModel;
    type Request = LabReportRequest;
    type Patch = LabReportPatchRequest;

    fn id_column() -> lab_report::Column {
        lab_report::Column::Id
    }

    fn created_column() -> lab_report::Column {
        lab_report::Column::CreatedAt
    }

    fn create(request: LabReportRequest, now: DateTime<Utc>) -> Result<lab_report::ActiveModel, InternalError> {
        Ok(lab_report::ActiveModel {
            id: Set(new_record_id()),
            patient_id: Set(required_text("patient_id", request.patient_id)?),
            hospital_id: Set(request.hospital_id),
            report_name: Set(required_text("report_name", request.report_name)?),
            file_url: Set(required_text("file_url", request.file_url)?),
            report_date: Set(today(now)),
            status: Set(request.status.unwrap_or_else(|| LAB_REPORT_DEFAULT_STATUS.to_string())),
            created_at: Set(now.timestamp()),
        })
    }

    fn replace(existing: lab_report::Model, request: LabReportRequest) -> Result<lab_report::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        active.patient_id = Set(required_text("patient_id", request.patient_id)?);
        active.hospital_id = Set(request.hospital_id);
        active.report_name = Set(required_text("report_name", request.report_name)?);
        active.file_url = Set(required_text("file_url", request.file_url)?);
        active.status = Set(request.status.unwrap_or_else(|| LAB_REPORT_DEFAULT_STATUS.to_string()));
        Ok(active)
    }

    fn patch(existing: lab_report::Model, patch: LabReportPatchRequest) -> Result<lab_report::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        if let Some(patient_id) = patch.patient_id {
            active.patient_id = Set(required_text("patient_id", patient_id)?);
        }
        if let Some(hospital_id) = nullable(patch.hospital_id) {
            active.hospital_id = Set(hospital_id);
        }
        if let Some(report_name) = patch.report_name {
            active.report_name = Set(required_text("report_name", report_name)?);
        }
        if let Some(file_url) = patch.file_url {
            active.file_url = Set(required_text("file_url", file_url)?);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        Ok(active)
    }
}

pub struct VaccinationResource;

impl Resource for VaccinationResource {
    const ENTITY_NAME: &'static str = "Vaccination";

    type Entity = vaccination::Entity;
    type Model = vaccination::Model;
    type ActiveModel = vaccination::ActiveModel;
    type Request = VaccinationRequest;
    type Patch = VaccinationPatchRequest;

    fn id_column() -> vaccination::Column {
        vaccination::Column::Id
    }

    fn created_column() -> vaccination::Column {
        vaccination::Column::CreatedAt
    }

    fn create(request: VaccinationRequest, now: DateTime<Utc>) -> Result<vaccination::ActiveModel, InternalError> {
        Ok(vaccination::ActiveModel {
            id: Set(new_record_id()),
            patient_id: Set(required_text("patient_id", request.patient_id)?),
            vaccine_name: Set(required_text("vaccine_name", request.vaccine_name)?),
            administered_date: Set(today(now)),
            next_due_date: Set(validate_optional_date("next_due_date", request.next_due_date)?),
            created_at: Set(now.timestamp()),
        })
    }

    fn replace(existing: vaccination::Model, request: VaccinationRequest) -> Result<vaccination::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        active.patient_id = Set(required_text("patient_id", request.patient_id)?);
        active.vaccine_name = Set(required_text("vaccine_name", request.vaccine_name)?);
        active.next_due_date = Set(validate_optional_date("next_due_date", request.next_due_date)?);
        Ok(active)
    }

    fn patch(existing: vaccination::Model, patch: VaccinationPatchRequest) -> Result<vaccination::ActiveModel, InternalError> {
        let mut active = existing.into_active_model();
        if let Some(patient_id) = patch.patient_id {
            active.patient_id = Set(required_text("patient_id", patient_id)?);
        }
        if let Some(vaccine_name) = patch.vaccine_name {
            active.vaccine_name = Set(required_text("vaccine_name", vaccine_name)?);
        }
        if let Some(next_due_date) = nullable(patch.next_due_date) {
            active.next_due_date = Set(next_due_date.map(|d| validate_date("next_due_date", d)).transpose()?);
        }
        Ok(active)
    }
}
