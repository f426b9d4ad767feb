use crate::errors::internal::{HospitalError, InternalError, RegistrationError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Error types for hospital, clinical, profile and analytics endpoints
#[derive(ApiResponse, Debug)]
pub enum ResourceError {
    /// Malformed or missing input
    #[oai(status = 400)]
    Validation(Json<ErrorResponse>),

    /// Uniqueness violation
    #[oai(status = 400)]
    Conflict(Json<ErrorResponse>),

    /// Referenced record does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Atomic workflow failed and was rolled back
    #[oai(status = 400)]
    Transaction(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ResourceError {
    pub fn validation(field: &str, message: String) -> Self {
        ResourceError::Validation(Json(
            ErrorResponse::new("validation_error", message, 400).with_field(field),
        ))
    }

    /// Write pointed at a parent row that does not exist
    ///
    /// SQLite does not report which column failed, so no field is named.
    pub fn invalid_reference() -> Self {
        ResourceError::Validation(Json(ErrorResponse::new(
            "validation_error",
            "Referenced record does not exist.",
            400,
        )))
    }

    pub fn conflict(field: Option<&str>, message: String) -> Self {
        let body = ErrorResponse::new("conflict", message, 400);
        let body = match field {
            Some(field) => body.with_field(field),
            None => body,
        };
        ResourceError::Conflict(Json(body))
    }

    pub fn not_found(entity: &str) -> Self {
        ResourceError::NotFound(Json(ErrorResponse::new(
            "not_found",
            format!("{} not found.", entity),
            404,
        )))
    }

    pub fn transaction(message: String) -> Self {
        ResourceError::Transaction(Json(ErrorResponse::new("transaction_failed", message, 400)))
    }

    fn internal_server_error() -> Self {
        ResourceError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    /// Convert InternalError to ResourceError
    ///
    /// Registration and contact-sync conflicts keep their field-named messages;
    /// infrastructure failures outside a workflow are logged and redacted.
    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Validation(validation) => {
                tracing::debug!("Validation failed: {}", validation);
                Self::validation(validation.field(), validation.to_string())
            }
            InternalError::Registration(RegistrationError::IdentityExists { email }) => {
                tracing::warn!("Registration conflict for {}", email);
                Self::conflict(Some("email"), "A user with this email already exists".to_string())
            }
            InternalError::Hospital(hospital) => {
                if let HospitalError::ContactEmailTaken { email } = &hospital {
                    tracing::warn!("Contact email {} already belongs to another user", email);
                }
                Self::validation(hospital.field(), hospital.to_string())
            }
            InternalError::NotFound { entity, id } => {
                tracing::debug!("{} not found: {}", entity, id);
                Self::not_found(entity)
            }
            InternalError::Transaction { workflow, message } => {
                tracing::error!("Workflow {} rolled back: {}", workflow, message);
                Self::transaction(message)
            }
            err if err.is_unique_violation() => {
                tracing::debug!("Unique constraint violation: {}", err);
                Self::conflict(None, "A record with these values already exists.".to_string())
            }
            err if err.is_foreign_key_violation() => {
                tracing::debug!("Foreign key violation: {}", err);
                Self::invalid_reference()
            }
            err => {
                tracing::error!("Unexpected error in resource operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Error body carried by every variant
    pub fn body(&self) -> &ErrorResponse {
        match self {
            ResourceError::Validation(json)
            | ResourceError::Conflict(json)
            | ResourceError::NotFound(json)
            | ResourceError::Transaction(json)
            | ResourceError::InternalError(json) => &json.0,
        }
    }

    pub fn message(&self) -> String {
        self.body().error.clone()
    }
}

impl From<InternalError> for ResourceError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
