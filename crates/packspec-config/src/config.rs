//! The build descriptor and profile merging logic.
//!
//! For file discovery, see the `discovery` module.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::bundle::{
    deserialize_entry, Devtool, LoaderSpec, MatchPattern, Mode, ModuleRules, OutputSpec, Rule,
};
use crate::error::{ConfigError, Result as ConfigResult};

/// Declarative description of one bundler invocation
///
/// Read-only once constructed: every operation here either borrows it or
/// returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build profile; the bundler minifies in `production`
    #[serde(default)]
    pub mode: Mode,

    /// Source map style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<Devtool>,

    /// Bundle name to source file
    #[serde(default, deserialize_with = "deserialize_entry")]
    pub entry: IndexMap<String, PathBuf>,

    #[serde(default)]
    pub output: OutputSpec,

    #[serde(default)]
    pub module: ModuleRules,

    /// Named partial overrides, applied with [`BuildConfig::materialize_profile`]
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, Value>,
}

impl BuildConfig {
    /// Create from serde_json::Value (for programmatic config from DB/API)
    ///
    /// # Example
    ///
    /// ```
    /// use packspec_config::{BuildConfig, Mode};
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let value = json!({
    ///     "entry": { "bundle": "./src/bundle.js" },
    ///     "mode": "development"
    /// });
    ///
    /// let config = BuildConfig::from_value(value).unwrap();
    /// assert_eq!(config.entry["bundle"], PathBuf::from("./src/bundle.js"));
    /// assert_eq!(config.mode, Mode::Development);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        if value.is_object() && value.get("mode").is_none() {
            warn!("descriptor has no 'mode'; falling back to production");
        }

        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: e.to_string(),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: e.to_string(),
        })
    }

    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let value: Value = toml::from_str(source).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: format!("Invalid TOML syntax: {e}"),
        })?;
        Self::from_value(value)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: e.to_string(),
        })
    }

    pub fn from_json_str(source: &str) -> ConfigResult<Self> {
        let value: Value = serde_json::from_str(source).map_err(|e| ConfigError::InvalidValue {
            field: "json".to_string(),
            hint: format!("Invalid JSON: {e}"),
        })?;
        Self::from_value(value)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "json".to_string(),
            hint: e.to_string(),
        })
    }

    /// Resolve relative entry and output paths against `root`.
    ///
    /// Mirrors `path.resolve(__dirname, ...)` in a hand-written bundler config.
    pub fn anchored(mut self, root: &Path) -> Self {
        for path in self.entry.values_mut() {
            *path = root.join(&*path).clean();
        }
        self.output.path = root.join(&self.output.path).clean();
        debug!(root = %root.display(), output = %self.output.path.display(), "anchored descriptor");
        self
    }

    /// Output file for one bundle, or `None` if no such entry exists
    pub fn output_file(&self, bundle: &str) -> Option<PathBuf> {
        self.entry
            .contains_key(bundle)
            .then(|| self.output.path.join(self.output.render_filename(bundle)))
    }

    /// Every output file, in entry order
    pub fn output_files(&self) -> Vec<(String, PathBuf)> {
        self.entry
            .keys()
            .map(|name| {
                (
                    name.clone(),
                    self.output.path.join(self.output.render_filename(name)),
                )
            })
            .collect()
    }

    /// Pipeline for one asset; the first matching rule wins.
    pub fn pipeline_for(&self, path: &Path) -> Option<&Rule> {
        let matches = self.module.all_matches(path);
        if matches.len() > 1 {
            warn!(
                path = %path.display(),
                rules = ?matches,
                "asset matches several rules; using rule {}",
                matches[0]
            );
        }
        matches.first().map(|&index| &self.module.rules[index])
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// The descriptor the project ships with: one bundle, CSS injected,
    /// fonts and images inlined below 100 kB.
    pub fn example() -> ConfigResult<Self> {
        let mut entry = IndexMap::new();
        entry.insert("bundle".to_string(), PathBuf::from("./src/bundle.js"));

        Ok(Self {
            mode: Mode::Production,
            devtool: None,
            entry,
            output: OutputSpec::new("bundle.js", "/project/resources/public/js"),
            module: ModuleRules {
                rules: vec![
                    Rule::new(
                        MatchPattern::new(r"\.css$")?,
                        vec![LoaderSpec::new("style-loader"), LoaderSpec::new("css-loader")],
                    ),
                    Rule::new(
                        MatchPattern::new(r"\.(png|woff|woff2|eot|ttf|svg)$")?,
                        vec![LoaderSpec::parse("url-loader?limit=100000")?],
                    ),
                ],
            },
            profiles: IndexMap::new(),
        })
    }
}

impl BuildConfig {
    /// Apply the named profile on top of the base descriptor.
    ///
    /// Objects merge key-wise; arrays and scalars replace.
    pub fn materialize_profile(self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let overrides = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })?;

        if overrides.is_null() {
            return Ok(self);
        }
        if !overrides.is_object() {
            return Err(ConfigError::InvalidProfileOverride {
                message: format!("profile '{name}' must be a table"),
            });
        }

        debug!(profile = name, "materializing profile");

        let profiles = self.profiles.clone();
        let mut base = serde_json::to_value(&self).map_err(|err| {
            ConfigError::InvalidProfileOverride {
                message: err.to_string(),
            }
        })?;
        if let Value::Object(map) = &mut base {
            map.remove("profiles");
        }
        merge_values(&mut base, &overrides);

        let mut merged: BuildConfig = serde_json::from_value(base).map_err(|err| {
            ConfigError::InvalidProfileOverride {
                message: err.to_string(),
            }
        })?;
        merged.profiles = profiles;
        Ok(merged)
    }
}

pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_creates_config() {
        let value = json!({
            "entry": { "bundle": "./src/bundle.js" },
            "mode": "production",
            "output": { "filename": "bundle.js", "path": "/srv/js" }
        });

        let config = BuildConfig::from_value(value).unwrap();
        assert_eq!(config.entry.len(), 1);
        assert_eq!(config.output.filename, "bundle.js");
        assert_eq!(config.mode, Mode::Production);
    }

    #[test]
    fn single_path_entry_is_named_main() {
        let config = BuildConfig::from_value(json!({ "entry": "src/index.js" })).unwrap();
        assert_eq!(config.entry["main"], PathBuf::from("src/index.js"));
    }

    #[test]
    fn missing_mode_falls_back_to_production() {
        let config = BuildConfig::from_value(json!({ "entry": "src/index.js" })).unwrap();
        assert_eq!(config.mode, Mode::Production);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result = BuildConfig::from_value(json!({ "mode": "none" }));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn invalid_rule_pattern_is_rejected() {
        let result = BuildConfig::from_value(json!({
            "module": { "rules": [ { "test": "\\.(css", "use": ["css-loader"] } ] }
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid match pattern"));
    }

    #[test]
    fn to_value_serializes_config() {
        let config = BuildConfig::example().unwrap();
        let value = config.to_value().unwrap();
        assert_eq!(value["mode"], json!("production"));
        assert_eq!(value["module"]["rules"][0]["use"], json!(["style-loader", "css-loader"]));
        assert_eq!(
            value["module"]["rules"][1]["use"][0],
            json!({ "loader": "url-loader", "options": { "limit": 100000 } })
        );
    }

    #[test]
    fn output_files_render_template() {
        let mut config = BuildConfig::default();
        config.entry.insert("app".into(), "src/app.js".into());
        config.entry.insert("admin".into(), "src/admin.js".into());
        config.output = OutputSpec::new("[name].bundle.js", "/srv/js");

        let files = config.output_files();
        assert_eq!(files[0], ("app".to_string(), PathBuf::from("/srv/js/app.bundle.js")));
        assert_eq!(files[1], ("admin".to_string(), PathBuf::from("/srv/js/admin.bundle.js")));
        assert_eq!(config.output_file("missing"), None);
    }

    #[test]
    fn anchored_resolves_relative_paths() {
        let mut config = BuildConfig::default();
        config.entry.insert("bundle".into(), "./src/bundle.js".into());
        config.output = OutputSpec::new("bundle.js", "resources/public/js");

        let config = config.anchored(Path::new("/project"));
        assert_eq!(config.entry["bundle"], PathBuf::from("/project/src/bundle.js"));
        assert_eq!(config.output.path, PathBuf::from("/project/resources/public/js"));
    }

    #[test]
    fn anchored_keeps_absolute_paths() {
        let mut config = BuildConfig::default();
        config.output = OutputSpec::new("bundle.js", "/srv/../srv/js");
        let config = config.anchored(Path::new("/project"));
        assert_eq!(config.output.path, PathBuf::from("/srv/js"));
    }

    #[test]
    fn profile_merging_works() {
        let value = json!({
            "entry": { "bundle": "src/bundle.js" },
            "mode": "production",
            "output": { "filename": "bundle.js" },
            "profiles": {
                "development": {
                    "mode": "development",
                    "devtool": "eval-source-map",
                    "output": { "path": "build" }
                }
            }
        });

        let config = BuildConfig::from_value(value)
            .unwrap()
            .materialize_profile(Some("development"))
            .unwrap();

        assert_eq!(config.mode, Mode::Development);
        assert_eq!(config.devtool, Some(Devtool::new("eval-source-map")));
        assert_eq!(config.output.filename, "bundle.js");
        assert_eq!(config.output.path, PathBuf::from("build"));
        assert!(config.profiles.contains_key("development"));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let config = BuildConfig::example().unwrap();
        let result = config.materialize_profile(Some("staging"));
        assert!(matches!(result, Err(ConfigError::ProfileNotFound { .. })));
    }

    #[test]
    fn no_profile_is_identity() {
        let config = BuildConfig::example().unwrap();
        let same = config.clone().materialize_profile(None).unwrap();
        assert_eq!(config, same);
    }
}
