use thiserror::Error;

pub mod credential;
pub mod database;
pub mod hospital;
pub mod notification;
pub mod registration;
pub mod validation;

pub use credential::CredentialError;
pub use database::DatabaseError;
pub use hospital::HospitalError;
pub use notification::NotificationError;
pub use registration::RegistrationError;
pub use validation::ValidationError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (database, parse, crypto) are shared; domain errors
/// are grouped per workflow. Not exposed via API - endpoints must convert to
/// `AuthError` or `ResourceError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    /// Unexpected failure inside an atomic workflow; the message is surfaced to the caller
    #[error("{message}")]
    Transaction {
        workflow: &'static str,
        message: String,
    },

    #[error("{entity} not found: {id}")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Hospital(#[from] HospitalError),

    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> InternalError {
        InternalError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Wrap an unexpected failure from inside a workflow transaction.
    ///
    /// Errors that already carry a user-facing meaning (validation, conflicts,
    /// missing records) pass through untouched.
    pub fn into_transaction_error(self, workflow: &'static str) -> InternalError {
        match self {
            InternalError::Validation(_)
            | InternalError::Registration(_)
            | InternalError::Hospital(_)
            | InternalError::NotFound { .. }
            | InternalError::Transaction { .. } => self,
            other => InternalError::Transaction {
                workflow,
                message: other.to_string(),
            },
        }
    }

    /// True when the underlying database rejected a write on a unique constraint
    pub fn is_unique_violation(&self) -> bool {
        match self {
            InternalError::Database(err) => err.is_unique_violation(),
            _ => false,
        }
    }

    /// True when the underlying database rejected a write on a foreign key
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            InternalError::Database(err) => err.is_foreign_key_violation(),
            _ => false,
        }
    }
}
