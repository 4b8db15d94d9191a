//! CLI argument definitions using clap
//!
//! Commands:
//! - gold-signals serve [--config <path>] [--host <host>] [--port <port>]
//! - gold-signals config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gold Signals - XAUUSD trading signal API
#[derive(Parser, Debug)]
#[command(name = "gold-signals")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind, overrides config and HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides config and PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the resolved configuration as JSON and exit
    Config {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
