//! Init command implementation.
//!
//! Scaffolds `packspec.toml` with the single-bundle layout: one entry,
//! CSS injected through style-loader, fonts and images inlined below 100 kB.

use std::fs;
use std::path::PathBuf;

use packspec_config::{discovery::TOML_CONFIG, BuildConfig};
use tracing::debug;

use crate::cli::InitArgs;
use crate::error::{CliError, Result};
use crate::ui;

/// Output directory written into a fresh descriptor, relative to it
const DEFAULT_OUTPUT_DIR: &str = "resources/public/js";

/// Execute the init command.
pub fn execute(args: InitArgs) -> Result<()> {
    let target = args.dir.join(TOML_CONFIG);
    if target.exists() && !args.force {
        return Err(CliError::AlreadyExists(target));
    }

    fs::create_dir_all(&args.dir)?;
    fs::write(&target, render()?)?;
    debug!(path = %target.display(), "wrote descriptor");

    ui::success(&format!("Created {}", target.display()));
    ui::info("Run `packspec check` once ./src/bundle.js exists");
    Ok(())
}

fn render() -> Result<String> {
    let mut config = BuildConfig::example()?;
    config.output.path = PathBuf::from(DEFAULT_OUTPUT_DIR);
    Ok(config.to_toml_string()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use packspec_config::Mode;

    #[test]
    fn rendered_descriptor_parses_back() {
        let source = render().unwrap();
        let config = BuildConfig::from_toml_str(&source).unwrap();

        assert_eq!(config.mode, Mode::Production);
        assert_eq!(config.output.path, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.module.rules.len(), 2);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TOML_CONFIG), "mode = \"development\"\n").unwrap();

        let err = execute(InitArgs {
            dir: dir.path().to_path_buf(),
            force: false,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::AlreadyExists(_)));

        execute(InitArgs {
            dir: dir.path().to_path_buf(),
            force: true,
        })
        .unwrap();
        let written = fs::read_to_string(dir.path().join(TOML_CONFIG)).unwrap();
        assert!(written.contains("style-loader"));
    }
}
