use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;

/// Connect to the database named by the bootstrap settings
///
/// Does NOT run migrations - call `migrate_database()` separately.
pub async fn init_database(bootstrap_settings: &BootstrapSettings) -> Result<DatabaseConnection, InternalError> {
    connect(bootstrap_settings.database_url()).await
}

pub async fn connect(database_url: &str) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to database");

    Ok(db)
}

/// Run all pending migrations on the given connection
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Database migrations completed");

    Ok(())
}

/// Begin a transaction for one workflow
pub async fn begin_transaction(db: &DatabaseConnection) -> Result<DatabaseTransaction, InternalError> {
    db.begin().await.map_err(InternalError::transaction_begin)
}

/// Commit a workflow transaction
pub async fn commit_transaction(txn: DatabaseTransaction) -> Result<(), InternalError> {
    txn.commit().await.map_err(InternalError::transaction_commit)
}
