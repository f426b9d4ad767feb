use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::Api;
use crate::coordinators::RecordCoordinator;
use crate::errors::ResourceError;
use crate::providers::TokenProvider;
use crate::resources::AnalyticsResource;
use crate::types::dto::DeletedResponse;
use crate::types::dto::analytics::{
    AnalyticsCreatedResponse, AnalyticsPatchRequest, AnalyticsRequest, AnalyticsResponse,
};

#[derive(Tags)]
enum AnalyticsTags {
    /// Computed hospital metrics
    Analytics,
}

/// Analytics trend endpoints
pub struct AnalyticsApi {
    coordinator: RecordCoordinator<AnalyticsResource>,
    token_provider: Arc<TokenProvider>,
}

impl AnalyticsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            token_provider: Arc::clone(&app_data.providers.token_provider),
            coordinator: RecordCoordinator::new(app_data),
        }
    }
}

impl Api for AnalyticsApi {
    fn token_provider(&self) -> &TokenProvider {
        &self.token_provider
    }
}

#[OpenApi]
impl AnalyticsApi {
    #[oai(path = "/analytics/trends", method = "get", tag = "AnalyticsTags::Analytics")]
    async fn list(&self) -> Result<Json<Vec<AnalyticsResponse>>, ResourceError> {
        let records = self.coordinator.list().await?;
        let records = records
            .into_iter()
            .map(AnalyticsResponse::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Json(records))
    }

    #[oai(path = "/analytics/trends", method = "post", tag = "AnalyticsTags::Analytics")]
    async fn create(&self, req: &Request, body: Json<AnalyticsRequest>) -> Result<AnalyticsCreatedResponse, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.create(&ctx, body.0).await?;
        Ok(AnalyticsCreatedResponse::Created(Json(AnalyticsResponse::try_from(record)?)))
    }

    #[oai(path = "/analytics/trends/:id", method = "get", tag = "AnalyticsTags::Analytics")]
    async fn retrieve(&self, id: Path<String>) -> Result<Json<AnalyticsResponse>, ResourceError> {
        let record = self.coordinator.get(&id).await?;
        Ok(Json(AnalyticsResponse::try_from(record)?))
    }

    #[oai(path = "/analytics/trends/:id", method = "put", tag = "AnalyticsTags::Analytics")]
    async fn update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<AnalyticsRequest>,
    ) -> Result<Json<AnalyticsResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.replace(&ctx, &id, body.0).await?;
        Ok(Json(AnalyticsResponse::try_from(record)?))
    }

    #[oai(path = "/analytics/trends/:id", method = "patch", tag = "AnalyticsTags::Analytics")]
    async fn partial_update(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<AnalyticsPatchRequest>,
    ) -> Result<Json<AnalyticsResponse>, ResourceError> {
        let ctx = self.request_context(req);
        let record = self.coordinator.patch(&ctx, &id, body.0).await?;
        Ok(Json(AnalyticsResponse::try_from(record)?))
    }

    #[oai(path = "/analytics/trends/:id", method = "delete", tag = "AnalyticsTags::Analytics")]
    async fn delete(&self, req: &Request, id: Path<String>) -> Result<DeletedResponse, ResourceError> {
        let ctx = self.request_context(req);
        self.coordinator.delete(&ctx, &id).await?;
        Ok(DeletedResponse::NoContent)
    }
}
