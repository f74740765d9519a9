//! CLI command implementations
//!
//! `createdb` owns creation of the catalog file; `serve` only opens an
//! existing one.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{FileCatalog, Table};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Server configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Catalog file (optional, default "ocd.db")
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// HTTP bind and CORS settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database() -> PathBuf {
    PathBuf::from("ocd.db")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            http: HttpServerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: ServerConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the effective config: file (or defaults), then flag overrides
    pub fn resolve(
        config: Option<&Path>,
        database: Option<PathBuf>,
        port: Option<u16>,
    ) -> CliResult<Self> {
        let mut resolved = match config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(database) = database {
            resolved.database = database;
        }
        if let Some(port) = port {
            resolved.http.port = port;
        }

        resolved.validate()?;
        Ok(resolved)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database.as_os_str().is_empty() {
            return Err(CliError::config_error("database must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        Ok(())
    }
}

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
        Command::Createdb { path } => createdb(&path),
        Command::Serve {
            config,
            database,
            port,
        } => serve(&ServerConfig::resolve(config.as_deref(), database, port)?),
    }
}

/// Create the catalog file with all tables.
///
/// An existing catalog is verified and left untouched.
pub fn createdb(path: &Path) -> CliResult<()> {
    let existed = path.exists();
    let catalog = FileCatalog::create(path)?;

    let path_str = path.display().to_string();
    if existed {
        let boulders = catalog.count(Table::Boulder)?.to_string();
        Logger::info(
            "CATALOG_OPENED",
            &[("path", &path_str), ("boulders", &boulders)],
        );
    } else {
        let tables = Table::ALL.map(|t| t.as_str()).join(",");
        Logger::info("DATABASE_CREATED", &[("path", &path_str), ("tables", &tables)]);
    }

    Ok(())
}

/// Open the catalog and serve the HTTP API until the process stops
pub fn serve(config: &ServerConfig) -> CliResult<()> {
    let catalog = FileCatalog::open(&config.database)?;

    let boulders = catalog.count(Table::Boulder)?.to_string();
    Logger::info(
        "CATALOG_OPENED",
        &[
            ("path", &config.database.display().to_string()),
            ("boulders", &boulders),
        ],
    );

    let server = HttpServer::new(config.http.clone(), Arc::new(catalog));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}
