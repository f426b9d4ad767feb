// API layer - HTTP endpoints
pub mod analytics;
pub mod auth;
pub mod clinical;
pub mod department;
pub mod health;
pub mod hospital;
pub mod profile;

pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use clinical::{LabReportApi, PrescriptionApi, VaccinationApi, VisitApi};
pub use department::DepartmentApi;
pub use health::HealthApi;
pub use hospital::HospitalApi;
pub use profile::ProfileApi;

use std::sync::Arc;

use poem::{Request, Route};
use poem_openapi::OpenApiService;

use crate::AppData;
use crate::providers::TokenProvider;
use crate::types::internal::context::RequestContext;

/// Shared behaviour of every endpoint group
pub trait Api {
    fn token_provider(&self) -> &TokenProvider;

    /// Request context for logging; carries claims when a valid bearer token was sent
    fn request_context(&self, req: &Request) -> RequestContext {
        RequestContext::from_request(req, self.token_provider())
    }
}

pub type ApiEndpoints = (
    HealthApi,
    AuthApi,
    HospitalApi,
    DepartmentApi,
    (VisitApi, PrescriptionApi, LabReportApi, VaccinationApi),
    ProfileApi,
    AnalyticsApi,
);

/// OpenAPI service for every endpoint group
pub fn api_service(app_data: Arc<AppData>) -> OpenApiService<ApiEndpoints, ()> {
    OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(Arc::clone(&app_data)),
            HospitalApi::new(Arc::clone(&app_data)),
            DepartmentApi::new(Arc::clone(&app_data)),
            (
                VisitApi::new(Arc::clone(&app_data)),
                PrescriptionApi::new(Arc::clone(&app_data)),
                LabReportApi::new(Arc::clone(&app_data)),
                VaccinationApi::new(Arc::clone(&app_data)),
            ),
            ProfileApi::new(Arc::clone(&app_data)),
            AnalyticsApi::new(app_data),
        ),
        "Hospital Administration API",
        env!("CARGO_PKG_VERSION"),
    )
}

/// Routes served by the application: the API under `/api`, Swagger UI under `/swagger`
pub fn create_app(app_data: Arc<AppData>, server_url: &str) -> Route {
    let api_service = api_service(app_data).server(server_url);
    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}
