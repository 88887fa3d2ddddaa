//! File-based config discovery for CLI use
//!
//! Handles finding and loading packspec descriptors from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::Env;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{merge_values, BuildConfig};
use crate::error::{ConfigError, Result};

pub const TOML_CONFIG: &str = "packspec.toml";
pub const JSON_CONFIG: &str = "packspec.json";
pub const PACKAGE_JSON: &str = "package.json";
/// Field holding the descriptor inside `package.json`
pub const PACKAGE_FIELD: &str = "packspec";
/// Environment overrides, e.g. `PACKSPEC_MODE` or `PACKSPEC_OUTPUT__PATH`
pub const ENV_PREFIX: &str = "PACKSPEC_";

/// File-based configuration discovery
///
/// Searches for packspec descriptors in conventional locations and loads them.
/// This is primarily for CLI use - library users should use `BuildConfig::from_value()` directly.
///
/// # Example
///
/// ```no_run
/// use packspec_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. packspec.toml
    /// 2. packspec.json
    /// 3. package.json (packspec field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in [TOML_CONFIG, JSON_CONFIG] {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        if pkg_path.is_file() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_FIELD).is_some_and(|field| !field.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<BuildConfig> {
        let path = self.find_or_not_found()?;
        self.load_from(&path)
    }

    /// Load config with profile merging
    pub fn load_with_profile(&self, profile: &str) -> Result<BuildConfig> {
        let path = self.find_or_not_found()?;
        load_file(&path, Some(profile))
    }

    /// Load config from a specific file path
    pub fn load_from(&self, path: &Path) -> Result<BuildConfig> {
        load_file(path, None)
    }

    fn find_or_not_found(&self) -> Result<PathBuf> {
        self.find().ok_or_else(|| ConfigError::NotFound {
            root: self.root.clone(),
        })
    }
}

/// Load one descriptor file.
///
/// Layers the file, then `profile`, then `PACKSPEC_*` environment overrides,
/// and anchors relative paths to the file's directory.
pub fn load_file(path: &Path, profile: Option<&str>) -> Result<BuildConfig> {
    debug!(path = %path.display(), profile = ?profile, "loading descriptor");

    let raw = read_value(path)?;
    let mut config = BuildConfig::from_value(raw)?.materialize_profile(profile)?;

    let overrides = env_overrides();
    if overrides.as_object().is_some_and(|map| !map.is_empty()) {
        debug!(?overrides, "applying environment overrides");
        let mut value = config.to_value()?;
        merge_values(&mut value, &overrides);
        config = BuildConfig::from_value(value)?;
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let root = std::path::absolute(dir)?;

    Ok(config.anchored(&root))
}

fn read_value(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            root: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;

    if path.file_name() == Some(std::ffi::OsStr::new(PACKAGE_JSON)) {
        return package_json_field(&content);
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: "json".to_string(),
            hint: format!("Invalid JSON: {e}"),
        }),
        Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: format!("Invalid TOML syntax: {e}"),
        }),
        other => Err(ConfigError::InvalidValue {
            field: "path".to_string(),
            hint: format!(
                "unsupported descriptor format '{}'; use .toml or .json",
                other.unwrap_or("")
            ),
        }),
    }
}

fn package_json_field(content: &str) -> Result<Value> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: PACKAGE_JSON.to_string(),
        hint: format!("Invalid JSON: {e}"),
    })?;

    match parsed.get(PACKAGE_FIELD) {
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: format!("Add a '{PACKAGE_FIELD}' field to your package.json"),
        }),
        Some(Value::Null) => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: format!("The '{PACKAGE_FIELD}' field cannot be null"),
        }),
        Some(value) => Ok(value.clone()),
    }
}

/// `PACKSPEC_*` variables as a nested value; `__` separates key segments.
///
/// Every overridable scalar in a descriptor is a string (mode, devtool,
/// paths, file names), so raw values are kept as strings rather than typed
/// by figment: `PACKSPEC_OUTPUT__FILENAME=2024` names a file, not a number.
fn env_overrides() -> Value {
    let mut overrides = Value::Object(Map::new());
    for (key, raw) in Env::prefixed(ENV_PREFIX).split("__").iter() {
        let key = key.as_str().to_ascii_lowercase();
        if key.split('.').all(str::is_empty) {
            continue;
        }
        let nested = key
            .rsplit('.')
            .filter(|segment| !segment.is_empty())
            .fold(Value::String(raw), |inner, segment| {
                let mut map = Map::new();
                map.insert(segment.to_string(), inner);
                Value::Object(map)
            });
        merge_values(&mut overrides, &nested);
    }
    overrides
}

/// Discover and load config from current directory (convenience function)
///
/// # Example
///
/// ```no_run
/// use packspec_config::discover;
///
/// let config = discover().unwrap();
/// ```
pub fn discover() -> Result<BuildConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Discover and load config with profile (convenience function)
///
/// # Example
///
/// ```no_run
/// use packspec_config::discover_with_profile;
///
/// let config = discover_with_profile("development").unwrap();
/// ```
pub fn discover_with_profile(profile: &str) -> Result<BuildConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}
