//! CLI argument definitions using clap
//!
//! Commands:
//! - ocd createdb <path>
//! - ocd serve [--config <path>] [--database <path>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ocd - boulder and problem catalog server
#[derive(Parser, Debug)]
#[command(name = "ocd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create an empty catalog file
    Createdb {
        /// Path of the catalog file
        path: PathBuf,
    },

    /// Serve the catalog HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Catalog file, overrides the config
        #[arg(long)]
        database: Option<PathBuf>,

        /// Port to listen on, overrides the config
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
