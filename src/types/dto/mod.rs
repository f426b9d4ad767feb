// Data transfer objects - request and response bodies
pub mod analytics;
pub mod auth;
pub mod clinical;
pub mod common;
pub mod department;
pub mod hospital;
pub mod profile;

use poem_openapi::ApiResponse;

/// API response for delete endpoints
#[derive(ApiResponse)]
pub enum DeletedResponse {
    /// Record removed
    #[oai(status = 204)]
    NoContent,
}
