//! Shared utilities for command implementations.

use std::path::{Path, PathBuf};

use packspec_config::{load_file, BuildConfig, ConfigDiscovery, ConfigError};
use tracing::debug;

use crate::cli::ConfigArgs;
use crate::error::Result;

/// A descriptor together with the file it came from
pub struct LoadedConfig {
    pub config: BuildConfig,
    pub path: PathBuf,
}

impl LoadedConfig {
    /// Directory the descriptor's relative paths were anchored to
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Load the descriptor named by `--config`, or discover one in the
/// working directory, applying `--profile` and environment overrides.
pub fn load_config(args: &ConfigArgs) -> Result<LoadedConfig> {
    let path = match &args.config {
        Some(path) => resolve_path(path, &std::env::current_dir()?),
        None => {
            let cwd = std::env::current_dir()?;
            ConfigDiscovery::new(&cwd)
                .find()
                .ok_or(ConfigError::NotFound { root: cwd })?
        }
    };
    debug!(path = %path.display(), "using descriptor");

    let config = load_file(&path, args.profile.as_deref())?;
    Ok(LoadedConfig { config, path })
}

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
