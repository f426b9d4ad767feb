use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::RecordCoordinator;
use crate::errors::ResourceError;
use crate::providers::TokenProvider;
use crate::resources::DepartmentResource;
use crate::types::dto::DeletedResponse;
use crate::types::dto::department::{
    DepartmentCreatedResponse, DepartmentPatchRequest, DepartmentRequest, DepartmentResponse,
};

/// Department endpoints
pub struct DepartmentApi {
    coordinator: RecordCoordinator<DepartmentResource>,
    token_provider: Arc<TokenProvider>,
}

impl DepartmentApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            coordinator: RecordCoordinator::new(app_data),
        }
    }
}

impl Api for DepartmentApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[derive(Tags)]
enum DepartmentTags {
    /// Hospital departments
    Departments,
}

#[OpenApi]
impl DepartmentApi {
    #[oai(path = "/departments", method = "get", tag = "DepartmentTags::Departments")]
    async fn list(&self) -> Result<Json<Vec<DepartmentResponse>>, ResourceError> {
        let departments = self.coordinator.list().await?;
        Ok(Json(departments.into_iter().map(DepartmentResponse::from).collect()))
    }

    /// Create a department; `id` is generated when omitted
    #[oai(path = "/departments", method = "post", tag = "DepartmentTags::Departments")]
    async fn create(
        &self,
        req: &Request,
        body: Json<DepartmentRequest>,
    ) -> Result<DepartmentCreatedResponse, ResourceError> {
        let ctx = self.request_context(req);
        let department = self.coordinator.create(&ctx, body.0).await?;
        Ok(DepartmentCreatedResponse::Created(Json(department.into())))
    }

    #[oai(path = "/departments/:id", method = "get", tag = "DepartmentTags::Departments")]
    async fn retrieve(&self, id: Path<String>) -> Result<Json<DepartmentResponse>, ResourceError> {
        Ok(Json(self.coordinator.get(&id).await?.into()))
    }

    #[oai(path = "/departments/:id", method = "put", tag = "DepartmentTags::Departments")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<DepartmentRequest>,
    ) -> Result<Json<DepartmentResponse>, ResourceError> {
        let ctx = self.request_context(req);
        Ok(Json(self.coordinator.replace(&ctx, &id, body.0).await?.into()))
    }

    #[oai(path = "/departments/:id", method = "patch", tag = "DepartmentTags::Departments")]
    async fn partial_update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<DepartmentPatchRequest>,
    ) -> Result<Json<DepartmentResponse>, ResourceError> {
        let ctx = self.request_context(req);
        Ok(Json(self.coordinator.patch(&ctx, &id, body.0).await?.into()))
    }

    #[oai(path = "/departments/:id", method = "delete", tag = "DepartmentTags::Departments")]
    async fn delete(&self, req: &Request, id: Path<String>) -> Result<DeletedResponse, ResourceError> {
        let ctx = self.request_context(req);
        self.coordinator.delete(&ctx, &id).await?;
        Ok(DeletedResponse::NoContent)
    }
}
