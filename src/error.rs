//! Crate-level error type.

use crate::checks::{FilterError, RegistryError, RunError};
use crate::cluster::AcquisitionError;
use crate::config::ConfigError;
use thiserror::Error;

/// Every way a `clusterlint` command can fail.
#[derive(Debug, Error)]
pub enum ClusterlintError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Check registration failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Invalid check selection: {0}")]
    Selection(#[from] FilterError),

    #[error("Invalid severity level '{0}' (expected error, warning or suggestion)")]
    InvalidLevel(String),

    #[error("Failed to acquire cluster snapshot: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("{0}")]
    Run(#[from] RunError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for `clusterlint` operations.
pub type Result<T> = std::result::Result<T, ClusterlintError>;
