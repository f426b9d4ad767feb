use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Stable machine-readable error code
    pub code: String,

    /// Offending input field, when the error concerns a single field
    #[oai(skip_serializing_if_is_none)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// HTTP status code
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: message.into(),
            code: code.to_string(),
            field: None,
            status_code,
        }
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

/// Plain acknowledgement message
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
