//! CLI command implementations
//!
//! Start-up order for `serve`:
//! 1. Configuration resolve and validate
//! 2. Logging
//! 3. Document store open (skipped when no database URL is set)
//! 4. HTTP server bind and serve

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{AppConfig, DatabaseConfig};
use crate::http_server::{AppState, HttpServer};
use crate::logging;
use crate::store::{self, DocumentStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => serve(config.as_deref(), host, port),
        Command::Config { config } => show_config(config.as_deref()),
    }
}

/// Resolves configuration with command-line flags applied last.
pub fn resolve_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<AppConfig> {
    let mut config = AppConfig::resolve(path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// Opens the configured store. No URL means the API runs without one.
pub fn open_store(database: &DatabaseConfig) -> CliResult<Option<Arc<dyn DocumentStore>>> {
    let Some(url) = database.url.as_deref() else {
        warn!("DATABASE_URL not set; persistence endpoints will fail");
        return Ok(None);
    };

    let store = store::open(url, database.name_or_default())?;
    info!(url, database = store.name(), "document store opened");
    Ok(Some(store))
}

/// Start the HTTP server
pub fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let config = resolve_config(config_path, host, port)?;
    logging::init(config.log_format);

    let store = open_store(&config.database)?;
    let state = AppState::new(store, config.database.clone());
    let server = HttpServer::with_config(config.server.clone(), state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start())
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// Print the resolved configuration
pub fn show_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = resolve_config(config_path, None, None)?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config)?;
    writeln!(stdout)?;
    Ok(())
}
