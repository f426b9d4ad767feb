use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::{HospitalCoordinator, RegistrationCoordinator};
use crate::errors::ResourceError;
use crate::providers::TokenProvider;
use crate::types::dto::hospital::{
    HospitalPatchRequest, HospitalPutRequest, HospitalRegistrationRequest, HospitalResponse,
    RegisterHospitalApiResponse, SystemStatsResponse,
};

/// Hospital registry endpoints
pub struct HospitalApi {
    hospital_coordinator: HospitalCoordinator,
    registration_coordinator: RegistrationCoordinator,
    token_provider: Arc<TokenProvider>,
}

impl HospitalApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            hospital_coordinator: HospitalCoordinator::new(Arc::clone(&app_data)),
            registration_coordinator: RegistrationCoordinator::new(app_data),
        }
    }
}

impl Api for HospitalApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[derive(Tags)]
enum HospitalTags {
    /// Hospital registry
    Hospitals,
}

#[OpenApi]
impl HospitalApi {
    /// List hospitals, newest first
    #[oai(path = "/hospitals", method = "get", tag = "HospitalTags::Hospitals")]
    async fn list(&self) -> Result<Json<Vec<HospitalResponse>>, ResourceError> {
        Ok(Json(self.hospital_coordinator.list_hospitals().await?))
    }

    /// Register a hospital together with its admin account
    ///
    /// The admin logs in with the given email and the returned temporary password.
    #[oai(path = "/hospitals/register", method = "post", tag = "HospitalTags::Hospitals")]
    async fn register(
        &self,
        req: &Request,
        body: Json<HospitalRegistrationRequest>,
    ) -> Result<RegisterHospitalApiResponse, ResourceError> {
        let ctx = self.request_context(req);
        let registered = self
            .registration_coordinator
            .register_hospital(&ctx, body.0)
            .await?;
        Ok(RegisterHospitalApiResponse::Created(Json(registered)))
    }

    /// Platform-wide counts of hospitals and people
    #[oai(path = "/hospitals/system_stats", method = "get", tag = "HospitalTags::Hospitals")]
    async fn system_stats(&self) -> Result<Json<SystemStatsResponse>, ResourceError> {
        Ok(Json(self.hospital_coordinator.system_stats().await?))
    }

    #[oai(path = "/hospitals/:id", method = "get", tag = "HospitalTags::Hospitals")]
    async fn retrieve(&self, id: Path<String>) -> Result<Json<HospitalResponse>, ResourceError> {
        Ok(Json(self.hospital_coordinator.get_hospital(&id).await?))
    }

    /// Partially update a hospital
    ///
    /// A changed `contact_email` is copied to every hospital admin of the hospital.
    #[oai(path = "/hospitals/:id", method = "patch", tag = "HospitalTags::Hospitals")]
    async fn partial_update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<HospitalPatchRequest>,
    ) -> Result<Json<HospitalResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let hospital = self
            .hospital_coordinator
            .update_hospital(&ctx, &id, body.0.into())
            .await?;
        Ok(Json(hospital))
    }

    /// Replace a hospital's writable fields
    ///
    /// A changed `contact_email` is copied to every hospital admin of the hospital.
    #[oai(path = "/hospitals/:id", method = "put", tag = "HospitalTags::Hospitals")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<HospitalPutRequest>,
    ) -> Result<Json<HospitalResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let hospital = self
            .hospital_coordinator
            .update_hospital(&ctx, &id, body.0.into())
            .await?;
        Ok(Json(hospital))
    }
}
