use crate::config::{BootstrapSettings, init_database, migrate_database};
use crate::types::internal::context::RequestContext;

/// Connect to the configured database and apply pending migrations
///
/// Does not initialize the full AppData structure, so no secrets are needed.
pub async fn run_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("migrate");
    tracing::info!(request_id = %ctx.request_id, "Running database migrations...");

    let bootstrap_settings = BootstrapSettings::from_env()?;
    let db = init_database(&bootstrap_settings).await?;
    migrate_database(&db).await?;

    tracing::info!(request_id = %ctx.request_id, "All migrations completed successfully");

    Ok(())
}
