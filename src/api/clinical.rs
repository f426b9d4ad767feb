use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::RecordCoordinator;
use crate::errors::ResourceError;
use crate::providers::TokenProvider;
use crate::resources::{LabReportResource, PrescriptionResource, VaccinationResource, VisitResource};
use crate::types::dto::DeletedResponse;
use crate::types::dto::clinical::{
    LabReportCreatedResponse, LabReportPatchRequest, LabReportRequest, LabReportResponse,
    PrescriptionCreatedResponse, PrescriptionPatchRequest, PrescriptionRequest, PrescriptionResponse,
    VaccinationCreatedResponse, VaccinationPatchRequest, VaccinationRequest, VaccinationResponse,
    VisitCreatedResponse, VisitPatchRequest, VisitRequest, VisitResponse,
};

#[derive(Tags)]
enum ClinicalTags {
    /// Patient visits
    Visits,
    /// Prescriptions
    Prescriptions,
    /// Lab reports
    LabReports,
    /// Vaccinations
    Vaccinations,
}

/// Patient visit endpoints
pub struct VisitApi {
    coordinator: RecordCoordinator<VisitResource>,
    token_provider: Arc<TokenProvider>,
}

impl VisitApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            coordinator: RecordCoordinator::new(app_data),
        }
    }
}

impl Api for VisitApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[OpenApi]
impl VisitApi {
    #[oai(path = "/clinical/visits", method = "get", tag = "ClinicalTags::Visits")]
    async fn list(&self) -> Result<Json<Vec<VisitResponse>>, ResourceError> {
        let records = self.coordinator.list().await?;
        Ok(Json(records.into_iter().map(VisitResponse::from).collect()))
    }

    #[oai(path = "/clinical/visits", method = "post", tag = "ClinicalTags::Visits")]
    async fn create(&self, req: &Request, body: Json<VisitRequest>) -> Result<VisitCreatedResponse, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.create(&ctx, body.0).await?;
        Ok(VisitCreatedResponse::Created(Json(record.into())))
    }

    #[oai(path = "/clinical/visits/:id", method = "get", tag = "ClinicalTags::Visits")]
    async fn retrieve(&self, id: Path<String>) -> Result<Json<VisitResponse>, ResourceError> {
        let record = self.coordinator.get(&id).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/visits/:id", method = "put", tag = "ClinicalTags::Visits")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<VisitRequest>,
    ) -> Result<Json<VisitResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.replace(&ctx, &id, body.0).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/visits/:id", method = "patch", tag = "ClinicalTags::Visits")]
    async fn partial_update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<VisitPatchRequest>,
    ) -> Result<Json<VisitResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.patch(&ctx, &id, body.0).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/visits/:id", method = "delete", tag = "ClinicalTags::Visits")]
    async fn delete(&self, req: &Request, id: Path<String>) -> Result<DeletedResponse, ResourceError> {
        let ctx = self.request_context(req);
        self.coordinator.delete(&ctx, &id).await?;
        Ok(DeletedResponse::NoContent)
    }
}

/// Prescription endpoints
pub struct PrescriptionApi {
    coordinator: RecordCoordinator<PrescriptionResource>,
    token_provider: Arc<TokenProvider>,
}

impl PrescriptionApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            coordinator: RecordCoordinator::new(app_data),
        }
    }
}

impl Api for PrescriptionApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[OpenApi]
impl PrescriptionApi {
    #[oai(path = "/clinical/prescriptions", method = "get", tag = "ClinicalTags::Prescriptions")]
    async fn list(&self) -> Result<Json<Vec<PrescriptionResponse>>, ResourceError> {
        let records = self.coordinator.list().await?;
        Ok(Json(records.into_iter().map(PrescriptionResponse::from).collect()))
    }

    #[oai(path = "/clinical/prescriptions", method = "post", tag = "ClinicalTags::Prescriptions")]
    async fn create(&self, req: &Request, body: Json<PrescriptionRequest>) -> Result<PrescriptionCreatedResponse, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.create(&ctx, body.0).await?;
        Ok(PrescriptionCreatedResponse::Created(Json(record.into())))
    }

    #[oai(path = "/clinical/prescriptions/:id", method = "get", tag = "ClinicalTags::Prescriptions")]
    async fn retrieve(&self, id: Path<String>) -> Result<Json<PrescriptionResponse>, ResourceError> {
        let record = self.coordinator.get(&id).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/prescriptions/:id", method = "put", tag = "ClinicalTags::Prescriptions")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<PrescriptionRequest>,
    ) -> Result<Json<PrescriptionResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.replace(&ctx, &id, body.0).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/prescriptions/:id", method = "patch", tag = "ClinicalTags::Prescriptions")]
    async fn partial_update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<PrescriptionPatchRequest>,
    ) -> Result<Json<PrescriptionResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.patch(&ctx, &id, body.0).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/prescriptions/:id", method = "delete", tag = "ClinicalTags::Prescriptions")]
    async fn delete(&self, req: &Request, id: Path<String>) -> Result<DeletedResponse, ResourceError> {
        let ctx = self.request_context(req);
        self.coordinator.delete(&ctx, &id).await?;
        Ok(DeletedResponse::NoContent)
    }
}

/// Lab report endpoints
pub struct LabReportApi {
    coordinator: RecordCoordinator<LabReportResource>,
    token_provider: Arc<TokenProvider>,
}

impl LabReportApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            coordinator: RecordCoordinator::new(app_data),
        }
    }
}

impl Api for LabReportApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[OpenApi]
impl LabReportApi {
    #[oai(path = "/clinical/lab-reports", method = "get", tag = "ClinicalTags::LabReports")]
    async fn list(&self) -> Result<Json<Vec<LabReportResponse>>, ResourceError> {
        let records = self.coordinator.list().await?;
        Ok(Json(records.into_iter().map(LabReportResponse::from).collect()))
    }

    #[oai(path = "/clinical/lab-reports", method = "post", tag = "ClinicalTags::LabReports")]
    async fn create(&self, req: &Request, body: Json<LabReportRequest>) -> Result<LabReportCreatedResponse, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.create(&ctx, body.0).await?;
        Ok(LabReportCreatedResponse::Created(Json(record.into())))
    }

    #[oai(path = "/clinical/lab-reports/:id", method = "get", tag = "ClinicalTags::LabReports")]
    async fn retrieve(&self, id: Path<String>) -> Result<Json<LabReportResponse>, ResourceError> {
        let record = self.coordinator.get(&id).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/lab-reports/:id", method = "put", tag = "ClinicalTags::LabReports")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<LabReportRequest>,
    ) -> Result<Json<LabReportResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.replace(&ctx, &id, body.0).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/lab-reports/:id", method = "patch", tag = "ClinicalTags::LabReports")]
    async fn partial_update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<LabReportPatchRequest>,
    ) -> Result<Json<LabReportResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.patch(&ctx, &id, body.0).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/lab-reports/:id", method = "delete", tag = "ClinicalTags::LabReports")]
    async fn delete(&self, req: &Request, id: Path<String>) -> Result<DeletedResponse, ResourceError> {
        let ctx = self.request_context(req);
        self.coordinator.delete(&ctx, &id).await?;
        Ok(DeletedResponse::NoContent)
    }
}

/// Vaccination endpoints
pub struct VaccinationApi {
    coordinator: RecordCoordinator<VaccinationResource>,
    token_provider: Arc<TokenProvider>,
}

impl VaccinationApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            coordinator: RecordCoordinator::new(app_data),
        }
    }
}

impl Api for VaccinationApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[OpenApi]
impl VaccinationApi {
    #[oai(path = "/clinical/vaccinations", method = "get", tag = "ClinicalTags::Vaccinations")]
    async fn list(&self) -> Result<Json<Vec<VaccinationResponse>>, ResourceError> {
        let records = self.coordinator.list().await?;
        Ok(Json(records.into_iter().map(VaccinationResponse::from).collect()))
    }

    #[oai(path = "/clinical/vaccinations", method = "post", tag = "ClinicalTags::Vaccinations")]
    async fn create(&self, req: &Request, body: Json<VaccinationRequest>) -> Result<VaccinationCreatedResponse, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.create(&ctx, body.0).await?;
        Ok(VaccinationCreatedResponse::Created(Json(record.into())))
    }

    #[oai(path = "/clinical/vaccinations/:id", method = "get", tag = "ClinicalTags::Vaccinations")]
    async fn retrieve(&self, id: Path<String>) -> Result<Json<VaccinationResponse>, ResourceError> {
        let record = self.coordinator.get(&id).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/vaccinations/:id", method = "put", tag = "ClinicalTags::Vaccinations")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<VaccinationRequest>,
    ) -> Result<Json<VaccinationResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.replace(&ctx, &id, body.0).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/vaccinations/:id", method = "patch", tag = "ClinicalTags::Vaccinations")]
    async fn partial_update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<VaccinationPatchRequest>,
    ) -> Result<Json<VaccinationResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.patch(&ctx, &id, body.0).await?;
        Ok(Json(record.into()))
    }

    #[oai(path = "/clinical/vaccinations/:id", method = "delete", tag = "ClinicalTags::Vaccinations")]
    async fn delete(&self, req: &Request, id: Path<String>) -> Result<DeletedResponse, ResourceError> {
        let ctx = self.request_context(req);
        self.coordinator.delete(&ctx, &id).await?;
        Ok(DeletedResponse::NoContent)
    }
}
