//! CLI error type and exit codes.

use hostfacts_core::{RegistryError, SettingsError};
use thiserror::Error;

/// Errors surfaced to the user.
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested fact is not in the catalog.
    #[error("{0}")]
    NotFound(String),

    /// The requested fact's resolver failed.
    #[error("{0}")]
    Resolve(String),

    /// Invalid settings from the environment or flags.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(String),

    /// Bootstrap or encoding failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Exit code, following sysexits.h where a category fits.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Resolve(_) => 1,
            Self::NotFound(_) => 2,
            Self::Internal(_) => 70, // EX_SOFTWARE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<RegistryError> for CliError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(_) => Self::NotFound(err.to_string()),
            RegistryError::Resolve { .. } => Self::Resolve(err.to_string()),
            RegistryError::DuplicateName(_) | RegistryError::InvalidName(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON encoding failed: {err}"))
    }
}
