//! Pluggable descriptor validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bundle::{ModuleRules, NAME_PLACEHOLDER};
use crate::config::BuildConfig;
use crate::emit::js_regex;
use crate::error::{ConfigError, Result};

/// Trait for pluggable descriptor validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use packspec_config::{BuildConfig, SchemaValidator, ConfigValidator};
///
/// let config = BuildConfig::example().unwrap();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        if config.entry.is_empty() {
            return Err(ConfigError::NoEntries);
        }

        for (name, path) in &config.entry {
            if name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "bundle names cannot be empty".to_string(),
                    hint: Some("Give every entry a name, e.g. bundle = \"./src/bundle.js\"".to_string()),
                });
            }
            if path.as_os_str().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("entry '{name}' has an empty path"),
                    hint: None,
                });
            }
        }

        if config.output.filename.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "output.filename cannot be empty".to_string(),
                hint: Some("Use a fixed name like bundle.js or a template like [name].js".to_string()),
            });
        }

        // Several bundles with a fixed filename would overwrite each other.
        if config.entry.len() > 1 && !config.output.has_name_placeholder() {
            return Err(ConfigError::SchemaValidation {
                message: format!(
                    "{} entries would all be written to '{}'",
                    config.entry.len(),
                    config.output.filename
                ),
                hint: Some(format!(
                    "Add {NAME_PLACEHOLDER} to output.filename, e.g. {NAME_PLACEHOLDER}.js"
                )),
            });
        }

        for (index, rule) in config.module.rules.iter().enumerate() {
            if rule.loaders.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("rule {index} ({}) has no loaders", rule.test),
                    hint: Some("List at least one loader under 'use'".to_string()),
                });
            }
            if let Some(loader) = rule.loaders.iter().find(|l| l.loader().trim().is_empty()) {
                return Err(ConfigError::SchemaValidation {
                    message: format!("rule {index} has an unnamed loader: '{loader}'"),
                    hint: None,
                });
            }
            // The bundler evaluates these as JavaScript regexes.
            js_regex(&rule.test)?;
            if let Some(exclude) = &rule.exclude {
                js_regex(exclude)?;
            }
        }

        if let Some(devtool) = &config.devtool {
            if config.mode.optimizes() && devtool.is_development_only() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("devtool '{devtool}' is development-only but mode is production"),
                    hint: Some("Use 'source-map' or 'hidden-source-map', or drop devtool".to_string()),
                });
            }
            if !config.mode.optimizes() && devtool.is_production_only() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("devtool '{devtool}' is production-only but mode is development"),
                    hint: Some("Use 'eval-source-map' or 'source-map' for development".to_string()),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Checks that entries exist and that the output directory can be written.
///
/// # Example
///
/// ```no_run
/// use packspec_config::{ConfigDiscovery, FsValidator, ConfigValidator};
///
/// let config = ConfigDiscovery::new(".").load().unwrap();
/// FsValidator::new(".").validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator; relative entries resolve against `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildConfig) -> Result<()> {
        // First run schema validation
        SchemaValidator.validate(config)?;

        for (name, entry) in &config.entry {
            let path = self.root.join(entry);
            if !path.exists() {
                return Err(ConfigError::EntryNotFound {
                    name: name.clone(),
                    path,
                });
            }
            if !path.is_file() {
                return Err(ConfigError::EntryNotAFile {
                    name: name.clone(),
                    path,
                });
            }
        }

        let output = &config.output.path;
        if !output.is_absolute() {
            return Err(ConfigError::OutputNotAbsolute {
                path: output.clone(),
            });
        }
        check_writable(output)
    }
}

/// The bundler creates missing directories, so the nearest existing
/// ancestor decides.
fn check_writable(path: &Path) -> Result<()> {
    let not_writable = || ConfigError::OutputNotWritable {
        path: path.to_path_buf(),
    };

    let existing = path
        .ancestors()
        .find(|candidate| candidate.exists())
        .ok_or_else(not_writable)?;
    debug!(output = %path.display(), checked = %existing.display(), "checking output directory");

    let meta = fs::metadata(existing)?;
    if !meta.is_dir() || meta.permissions().readonly() {
        return Err(not_writable());
    }

    // Permission bits say nothing about who may write; creating a file does.
    tempfile::Builder::new()
        .prefix(".packspec-write-check")
        .tempfile_in(existing)
        .map(drop)
        .map_err(|err| {
            debug!(checked = %existing.display(), error = %err, "output directory rejected write");
            not_writable()
        })
}

/// Pairs `(shadowed, by)` where a rule repeats an earlier rule's pattern
/// without an exclude, so it can never be the first match.
pub fn shadowed_rules(rules: &ModuleRules) -> Vec<(usize, usize)> {
    let mut shadowed = Vec::new();
    for (index, rule) in rules.rules.iter().enumerate() {
        let earlier = rules.rules[..index]
            .iter()
            .position(|prev| prev.exclude.is_none() && prev.test == rule.test);
        if let Some(by) = earlier {
            shadowed.push((index, by));
        }
    }
    shadowed
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &BuildConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
///
/// # Example
///
/// ```no_run
/// use packspec_config::{discover, validate_fs};
///
/// let config = discover().unwrap();
/// validate_fs(&config, ".").unwrap();
/// ```
pub fn validate_fs(config: &BuildConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
