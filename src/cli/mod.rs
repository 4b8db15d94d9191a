//! CLI module for Gold Signals
//!
//! Provides command-line interface for:
//! - serve: Resolve configuration, open the store and run the HTTP API
//! - config: Print the resolved configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{open_store, resolve_config, run, run_command, serve, show_config};
pub use errors::{CliError, CliResult};
