//! Error types for descriptor loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("entry '{name}' not found: {}", path.display())]
    EntryNotFound { name: String, path: PathBuf },

    #[error("entry '{name}' is not a file: {}", path.display())]
    EntryNotAFile { name: String, path: PathBuf },

    #[error("output path must be absolute: {}", path.display())]
    OutputNotAbsolute { path: PathBuf },

    #[error("output directory is not writable: {}", path.display())]
    OutputNotWritable { path: PathBuf },

    // Config parsing/loading errors
    #[error("no packspec config found in {}", root.display())]
    NotFound { root: PathBuf },

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("invalid match pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid loader '{spec}': {reason}")]
    InvalidLoader { spec: String, reason: String },

    #[error("profile '{name}' is not defined")]
    ProfileNotFound { name: String },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    // Schema validation errors (no filesystem checks)
    #[error("no entries specified")]
    NoEntries,

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Actionable suggestion for the user, when one exists.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::SchemaValidation { hint, .. } => hint.as_deref(),
            ConfigError::NoEntries => Some("Add at least one bundle under [entry]"),
            ConfigError::NotFound { .. } => {
                Some("Create packspec.toml or run `packspec init`")
            }
            ConfigError::EntryNotFound { .. } => {
                Some("Entry paths are resolved relative to the config file")
            }
            ConfigError::OutputNotAbsolute { .. } => {
                Some("Load the descriptor through ConfigDiscovery to anchor relative paths")
            }
            ConfigError::InvalidPattern { .. } => {
                Some("Match patterns must mean the same to the bundler's JavaScript regexes, e.g. '\\.css$'")
            }
            _ => None,
        }
    }
}
