use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {operation} failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: DbErr,
    },

    #[error("Starting transaction failed: {source}")]
    TransactionBegin {
        #[source]
        source: DbErr,
    },

    #[error("Committing transaction failed: {source}")]
    TransactionCommit {
        #[source]
        source: DbErr,
    },
}

impl DatabaseError {
    pub fn db_err(&self) -> &DbErr {
        match self {
            DatabaseError::Operation { source, .. } => source,
            DatabaseError::TransactionBegin { source } => source,
            DatabaseError::TransactionCommit { source } => source,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self.db_err().sql_err(),
            Some(SqlErr::UniqueConstraintViolation(_))
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self.db_err().sql_err(),
            Some(SqlErr::ForeignKeyConstraintViolation(_))
        )
    }
}
