//! CLI argument definitions using clap
//!
//! Commands:
//! - tienda serve [--config <path>] [--memory]
//! - tienda init-table [--config <path>]
//!
//! Every connection setting can also come from the environment.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogFormat;

/// Tienda - CRUD API over the products table
#[derive(Parser, Debug)]
#[command(name = "tienda")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log line format
    #[arg(long, global = true, env = "TIENDA_LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind to
        #[arg(long, env = "TIENDA_HOST")]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, env = "TIENDA_PORT")]
        port: Option<u16>,

        /// Keep products in process memory instead of DynamoDB
        #[arg(long)]
        memory: bool,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Create the products table if it does not exist
    InitTable {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        store: StoreArgs,
    },
}

/// DynamoDB connection overrides
#[derive(Args, Debug, Default, Clone)]
pub struct StoreArgs {
    /// DynamoDB endpoint URL
    #[arg(long, env = "DYNAMODB_ENDPOINT")]
    pub endpoint: Option<String>,

    /// DynamoDB region
    #[arg(long, env = "DYNAMODB_REGION")]
    pub region: Option<String>,

    /// DynamoDB access key id
    #[arg(long, env = "DYNAMODB_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// DynamoDB secret access key
    #[arg(long, env = "DYNAMODB_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Products table name
    #[arg(long, env = "PRODUCTS_TABLE")]
    pub table: Option<String>,

    /// Identifier attribute of the products table
    #[arg(long, env = "PRODUCTS_KEY_ATTRIBUTE")]
    pub key_attribute: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
