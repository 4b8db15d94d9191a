//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed to stderr and the process exits
//! non-zero.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StorageError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("GOLD_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    /// The document store could not be opened
    #[error("GOLD_CLI_STORE_ERROR: {0}")]
    Store(#[from] StorageError),

    /// Runtime or listener start-up failed
    #[error("GOLD_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),

    /// stdout could not be written
    #[error("GOLD_CLI_IO_ERROR: {0}")]
    Io(#[from] io::Error),

    #[error("GOLD_CLI_IO_ERROR: JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub const CONFIG_ERROR: &'static str = "GOLD_CLI_CONFIG_ERROR";
    pub const STORE_ERROR: &'static str = "GOLD_CLI_STORE_ERROR";
    pub const BOOT_FAILED: &'static str = "GOLD_CLI_BOOT_FAILED";
    pub const IO_ERROR: &'static str = "GOLD_CLI_IO_ERROR";

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        CliError::BootFailed(msg.into())
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            CliError::Config(_) => Self::CONFIG_ERROR,
            CliError::Store(_) => Self::STORE_ERROR,
            CliError::BootFailed(_) => Self::BOOT_FAILED,
            CliError::Io(_) | CliError::Json(_) => Self::IO_ERROR,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::from(ConfigError::Parse("expected value".to_string()));
        assert_eq!(err.code_str(), CliError::CONFIG_ERROR);
        assert!(err.to_string().starts_with("GOLD_CLI_CONFIG_ERROR: "));

        let err = CliError::boot_failed("address in use");
        assert_eq!(err.to_string(), "GOLD_CLI_BOOT_FAILED: address in use");
    }
}
