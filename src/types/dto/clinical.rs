use poem_openapi::{ApiResponse, Object, payload::Json, types::MaybeUndefined};
use serde::{Deserialize, Serialize};

use crate::types::db::{lab_report, prescription, vaccination, visit};

// Visits

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct VisitResponse {
    pub id: String,
    pub hospital_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub diagnosis: String,
    pub prescription_text: Option<String>,
    pub clinical_notes: Option<String>,
    /// Visit time (Unix timestamp)
    pub visit_date: i64,
    /// Follow-up date (YYYY-MM-DD)
    pub next_visit_date: Option<String>,
    pub created_at: i64,
}

impl From<visit::Model> for VisitResponse {
    fn from(model: visit::Model) -> Self {
        Self {
            id: model.id,
            hospital_id: model.hospital_id,
            patient_id: model.patient_id,
            doctor_id: model.doctor_id,
            diagnosis: model.diagnosis,
            prescription_text: model.prescription_text,
            clinical_notes: model.clinical_notes,
            visit_date: model.visit_date,
            next_visit_date: model.next_visit_date,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug, Default)]
pub struct VisitRequest {
    pub hospital_id: String,
    /// Patient profile ID
    pub patient_id: String,
    /// Doctor profile ID
    pub doctor_id: String,
    pub diagnosis: String,
    pub prescription_text: Option<String>,
    pub clinical_notes: Option<String>,
    /// Follow-up date (YYYY-MM-DD)
    pub next_visit_date: Option<String>,
}

#[derive(Object, Debug, Default)]
pub struct VisitPatchRequest {
    pub hospital_id: Option<String>,
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub diagnosis: Option<String>,
    pub prescription_text: MaybeUndefined<String>,
    pub clinical_notes: MaybeUndefined<String>,
    pub next_visit_date: MaybeUndefined<String>,
}

#[derive(ApiResponse)]
pub enum VisitCreatedResponse {
    #[oai(status = 201)]
    Created(Json<VisitResponse>),
}

// Prescriptions

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionResponse {
    pub id: String,
    pub visit_id: Option<String>,
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub medicine_name: String,
    pub dosage: Option<String>,
    pub duration: Option<String>,
    pub status: String,
    pub created_at: i64,
}

impl From<prescription::Model> for PrescriptionResponse {
    fn from(model: prescription::Model) -> Self {
        Self {
            id: model.id,
            visit_id: model.visit_id,
            patient_id: model.patient_id,
            doctor_id: model.doctor_id,
            medicine_name: model.medicine_name,
            dosage: model.dosage,
            duration: model.duration,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug, Default)]
pub struct PrescriptionRequest {
    pub visit_id: Option<String>,
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub medicine_name: String,
    pub dosage: Option<String>,
    pub duration: Option<String>,
    /// Defaults to "Active"
    pub status: Option<String>,
}

#[derive(Object, Debug, Default)]
pub struct PrescriptionPatchRequest {
    pub visit_id: MaybeUndefined<String>,
    pub patient_id: Option<String>,
    pub doctor_id: MaybeUndefined<String>,
    pub medicine_name: Option<String>,
    pub dosage: MaybeUndefined<String>,
    pub duration: MaybeUndefined<String>,
    pub status: Option<String>,
}

#[derive(ApiResponse)]
pub enum PrescriptionCreatedResponse {
    #[oai(status = 201)]
    Created(Json<PrescriptionResponse>),
}

// Lab reports

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct LabReportResponse {
    pub id: String,
    pub patient_id: String,
    pub hospital_id: Option<String>,
    pub report_name: String,
    pub file_url: String,
    /// Date the report was filed (YYYY-MM-DD)
    pub report_date: String,
    pub status: String,
    pub created_at: i64,
}

impl From<lab_report::Model> for LabReportResponse {
    fn from(model: lab_report::Model) -> Self {
        Self {
            id: model.id,
            patient_id: model.patient_id,
            hospital_id: model.hospital_id,
            report_name: model.report_name,
            file_url: model.file_url,
            report_date: model.report_date,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug, Default)]
pub struct LabReportRequest {
    pub patient_id: String,
    pub hospital_id: Option<String>,
    pub report_name: String,
    pub file_url: String,
    /// Defaults to "Normal"
    pub status: Option<String>,
}

#[derive(Object, Debug, Default)]
pub struct LabReportPatchRequest {
    pub patient_id: Option<String>,
    pub hospital_id: MaybeUndefined<String>,
    pub report_name: Option<String>,
    pub file_url: Option<String>,
    pub status: Option<String>,
}

#[derive(ApiResponse)]
pub enum LabReportCreatedResponse {
    #[oai(status = 201)]
    Created(Json<LabReportResponse>),
}

// Vaccinations

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct VaccinationResponse {
    pub id: String,
    pub patient_id: String,
    pub vaccine_name: String,
    /// YYYY-MM-DD
    pub administered_date: String,
    /// YYYY-MM-DD
    pub next_due_date: Option<String>,
    pub created_at: i64,
}

impl From<vaccination::Model> for VaccinationResponse {
    fn from(model: vaccination::Model) -> Self {
        Self {
            id: model.id,
            patient_id: model.patient_id,
            vaccine_name: model.vaccine_name,
            administered_date: model.administered_date,
            next_due_date: model.next_due_date,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug, Default)]
pub struct VaccinationRequest {
    pub patient_id: String,
    pub vaccine_name: String,
    pub next_due_date: Option<String>,
}

#[derive(Object, Debug, Default)]
pub struct VaccinationPatchRequest {
    pub patient_id: Option<String>,
    pub vaccine_name: Option<String>,
    pub next_due_date: MaybeUndefined<String>,
}

#[derive(ApiResponse)]
pub enum VaccinationCreatedResponse {
    #[oai(status = 201)]
    Created(Json<VaccinationResponse>),
}
