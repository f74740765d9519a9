//! CLI module for ocd
//!
//! Provides command-line interface for:
//! - createdb: Create the catalog file
//! - serve: Open the catalog and serve the HTTP API

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{createdb, run, run_command, serve, ServerConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
