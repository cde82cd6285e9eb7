//! CLI command implementations
//!
//! Settings are resolved in order: command-line argument or environment
//! variable, then the optional JSON config file, then built-in defaults.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{init_logging, LogFormat};
use crate::rest_api::ProductService;
use crate::store::{DynamoStore, InMemoryStore, RecordStore, StoreConfig};

use super::args::{Command, StoreArgs};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP bind and CORS settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// DynamoDB connection and table settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Log line format (default: "text")
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        Ok(config)
    }

    /// Load the file if one was given, defaults otherwise
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Overlay command-line and environment values onto the store settings
    pub fn apply_store_args(&mut self, args: &StoreArgs) {
        let store = &mut self.store;
        let overrides = [
            (&mut store.endpoint, &args.endpoint),
            (&mut store.region, &args.region),
            (&mut store.access_key_id, &args.access_key_id),
            (&mut store.secret_access_key, &args.secret_access_key),
            (&mut store.table, &args.table),
            (&mut store.key_attribute, &args.key_attribute),
        ];
        for (target, value) in overrides {
            if let Some(value) = value {
                *target = value.clone();
            }
        }
    }

    /// Reject settings no backend can work with
    pub fn validate(&self) -> CliResult<()> {
        if self.store.table.trim().is_empty() {
            return Err(CliError::config_error("table cannot be empty"));
        }
        if self.store.key_attribute.trim().is_empty() {
            return Err(CliError::config_error("key_attribute cannot be empty"));
        }
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("host cannot be empty"));
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
    run_command(cli.command, cli.log_format)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, log_format: Option<LogFormat>) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            memory,
            store,
        } => {
            let mut config = Config::resolve(config.as_deref())?;
            config.apply_store_args(&store);
            if let Some(host) = host {
                config.http.host = host;
            }
            if let Some(port) = port {
                config.http.port = port;
            }
            if let Some(format) = log_format {
                config.log_format = format;
            }
            config.validate()?;
            serve(config, memory)
        }
        Command::InitTable { config, store } => {
            let mut config = Config::resolve(config.as_deref())?;
            config.apply_store_args(&store);
            if let Some(format) = log_format {
                config.log_format = format;
            }
            config.validate()?;
            init_table(config)
        }
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))
}

/// Start the HTTP API over DynamoDB, or over process memory with `memory`
pub fn serve(config: Config, memory: bool) -> CliResult<()> {
    init_logging(config.log_format);

    let rt = runtime()?;
    rt.block_on(async {
        let store: Arc<dyn RecordStore> = if memory {
            tracing::warn!("using in-memory store; products are lost on exit");
            Arc::new(InMemoryStore::with_key_attribute(
                config.store.key_attribute.clone(),
            ))
        } else {
            tracing::info!(
                endpoint = %config.store.endpoint,
                table = %config.store.table,
                "using DynamoDB store"
            );
            Arc::new(DynamoStore::connect(&config.store).await)
        };

        let server = HttpServer::with_config(config.http, ProductService::new(store));
        server
            .start()
            .await
            .map_err(|e| CliError::io_error(format!("HTTP server failed: {}", e)))
    })
}

/// Create the products table if it does not exist
pub fn init_table(config: Config) -> CliResult<()> {
    init_logging(config.log_format);

    let rt = runtime()?;
    rt.block_on(async {
        let store = DynamoStore::connect(&config.store).await;
        if store.ensure_table().await? {
            tracing::info!(table = %config.store.table, "table created");
        } else {
            tracing::info!(table = %config.store.table, "table already exists");
        }
        Ok::<(), CliError>(())
    })
}
