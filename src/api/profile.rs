use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::RecordCoordinator;
use crate::errors::ResourceError;
use crate::providers::TokenProvider;
use crate::resources::ProfileResource;
use crate::types::dto::DeletedResponse;
use crate::types::dto::profile::{
    ProfileCreatedResponse, ProfilePatchRequest, ProfileRequest, ProfileResponse,
};

#[derive(Tags)]
enum ProfileTags {
    /// People: admins, doctors, staff and patients
    Profiles,
}

/// Profile directory endpoints
pub struct ProfileApi {
    coordinator: RecordCoordinator<ProfileResource>,
    token_provider: Arc<TokenProvider>,
}

impl ProfileApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            coordinator: RecordCoordinator::new(app_data),
        }
    }
}

impl Api for ProfileApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[OpenApi]
impl ProfileApi {
    #[oai(path = "/profiles", method = "get", tag = "ProfileTags::Profiles")]
    async fn list(&self) -> Result<Json<Vec<ProfileResponse>>, ResourceError> {
        let records = self.coordinator.list().await?;
        let records = records
            .into_iter()
            .map(ProfileResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Json(records))
    }

    #[oai(path = "/profiles", method = "post", tag = "ProfileTags::Profiles")]
    async fn create(&self, req: &Request, body: Json<ProfileRequest>) -> Result<ProfileCreatedResponse, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.create(&ctx, body.0).await?;
        Ok(ProfileCreatedResponse::Created(Json(ProfileResponse::try_from(record)?)))
    }

    #[oai(path = "/profiles/:id", method = "get", tag = "ProfileTags::Profiles")]
    async fn retrieve(&self, id: Path<String>) -> Result<Json<ProfileResponse>, ResourceError> {
        let record = self.coordinator.get(&id).await?;
        Ok(Json(ProfileResponse::try_from(record)?))
    }

    #[oai(path = "/profiles/:id", method = "put", tag = "ProfileTags::Profiles")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<ProfileRequest>,
    ) -> Result<Json<ProfileResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.replace(&ctx, &id, body.0).await?;
        Ok(Json(ProfileResponse::try_from(record)?))
    }

    #[oai(path = "/profiles/:id", method = "patch", tag = "ProfileTags::Profiles")]
    async fn partial_update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<ProfilePatchRequest>,
    ) -> Result<Json<ProfileResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.patch(&ctx, &id, body.0).await?;
        Ok(Json(ProfileResponse::try_from(record)?))
    }

    #[oai(path = "/profiles/:id", method = "delete", tag = "ProfileTags::Profiles")]
    async fn delete(&self, req: &Request, id: Path<String>) -> Result<DeletedResponse, ResourceError> {
        let ctx = self.request_context(req);
        self.coordinator.delete(&ctx, &id).await?;
        Ok(DeletedResponse::NoContent)
    }
}
