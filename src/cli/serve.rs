use std::sync::Arc;

use poem::{Server, listener::TcpListener};

use crate::AppData;
use crate::api::create_app;
use crate::config::{BootstrapSettings, init_database, migrate_database};

/// Migrate the database, then serve the API until the process is stopped
pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let bootstrap_settings = BootstrapSettings::from_env()?;
    tracing::debug!("Bootstrap settings: {:?}", bootstrap_settings);

    let db = init_database(&bootstrap_settings).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db).await?);

    let address = bootstrap_settings.server_address();
    let server_url = format!("http://{}/api", address);
    let app = create_app(app_data, &server_url);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
