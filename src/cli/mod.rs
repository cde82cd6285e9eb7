//! CLI module for Tienda
//!
//! Provides command-line interface for:
//! - serve: Run the products HTTP API
//! - init-table: Create the products table

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, StoreArgs};
pub use commands::{init_table, run, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
