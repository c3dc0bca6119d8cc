//! Strictly Arcade - HTTP server binary

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_arcade::{AppState, ServerConfig, SessionRegistry, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
    }
}

/// Run the HTTP game server
async fn run_server(config_path: PathBuf, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = ServerConfig::load_or_default(&config_path)?
        .with_env_overrides()?
        .with_cli_overrides(host, port);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    serve(config).await
}

#[instrument(skip_all, fields(addr = %config.bind_address()))]
async fn serve(config: ServerConfig) -> Result<()> {
    let app = router(AppState::new(SessionRegistry::new()), config.allowed_origins())?;

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Server ready at http://{}/api", listener.local_addr()?);

    axum::serve(listener, app).await?;

    info!("Server stopped");
    Ok(())
}
