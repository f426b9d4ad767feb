// CLI module: serve the API (default) or run migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Hospital administration backend
#[derive(Parser)]
#[command(name = "hospital_backend")]
#[command(about = "Hospital administration backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run migrations and start the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
pub async fn execute_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_server().await?,
        Commands::Migrate => migrate::run_migrations().await?,
    }

    Ok(())
}
