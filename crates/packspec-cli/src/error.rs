//! Error handling for the packspec CLI.
//!
//! `CliError` wraps descriptor errors from `packspec-config` and adds the
//! failures that only exist at the command line. Conversion to a `miette`
//! report happens once, in `main`.

use std::path::PathBuf;

use miette::Report;
use packspec_config::ConfigError;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Descriptor loading or validation failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Refusing to overwrite an existing file
    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Walking an asset directory failed
    #[error("Failed to scan assets: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CliError {
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::Config(err) => err.hint().map(str::to_string),
            CliError::AlreadyExists(_) => Some("Pass --force to overwrite it".to_string()),
            _ => None,
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err.hint() {
        Some(hint) => miette::miette!(help = hint, "{}", err),
        None => miette::miette!("{}", err),
    }
}
