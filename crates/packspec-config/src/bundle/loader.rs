use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// One processor in a rule's pipeline
///
/// Accepts the bundler's string shorthands as well as the object form:
///
/// ```
/// use packspec_config::LoaderSpec;
/// use serde_json::json;
///
/// let spec: LoaderSpec = "url-loader?limit=100000".parse().unwrap();
/// assert_eq!(spec.loader(), "url-loader");
/// assert_eq!(spec.option("limit"), Some(&json!(100000)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoader", into = "RawLoader")]
pub struct LoaderSpec {
    loader: String,
    options: IndexMap<String, Value>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawLoader {
    Short(String),
    Full {
        loader: String,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        options: IndexMap<String, Value>,
    },
}

impl LoaderSpec {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Parse `name`, `name?k=v&flag` or `name?{"k":v}`
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| ConfigError::InvalidLoader {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (name, query) = match spec.split_once('?') {
            Some((name, query)) => (name.trim(), Some(query.trim())),
            None => (spec.trim(), None),
        };

        if name.is_empty() {
            return Err(invalid("loader name is empty"));
        }

        let mut loader = LoaderSpec::new(name);
        let Some(query) = query else {
            return Ok(loader);
        };

        if query.starts_with('{') {
            let parsed: Value = serde_json::from_str(query)
                .map_err(|e| invalid(&format!("invalid JSON options: {e}")))?;
            let Value::Object(map) = parsed else {
                return Err(invalid("JSON options must be an object"));
            };
            loader.options.extend(map);
            loader.reject_null_options(spec)?;
            return Ok(loader);
        }

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, raw)) => (key.trim(), Some(raw.trim())),
                None => (pair.trim(), None),
            };
            let key = urlencoding::decode(key)
                .map_err(|e| invalid(&format!("option name is not UTF-8: {e}")))?;
            if key.is_empty() {
                return Err(invalid("option name is empty"));
            }
            let value = match value {
                Some(raw) => query_value(
                    &urlencoding::decode(raw)
                        .map_err(|e| invalid(&format!("option '{key}' is not UTF-8: {e}")))?,
                ),
                None => Value::Bool(true),
            };
            loader.options.insert(key.into_owned(), value);
        }

        loader.reject_null_options(spec)?;
        Ok(loader)
    }

    /// TOML has no null, so a null anywhere in the options could never be
    /// written back out.
    fn reject_null_options(&self, spec: &str) -> Result<()> {
        match self.options.iter().find(|(_, value)| contains_null(value)) {
            Some((key, _)) => Err(ConfigError::InvalidLoader {
                spec: spec.to_string(),
                reason: format!("option '{key}' is null; omit it instead"),
            }),
            None => Ok(()),
        }
    }

    pub fn loader(&self) -> &str {
        &self.loader
    }

    pub fn options(&self) -> &IndexMap<String, Value> {
        &self.options
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

/// Query values are typed the way the bundler's query parser types them.
fn query_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    // `007` is an identifier, not the number 7.
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.len() > 1 && digits.starts_with('0') && digits.as_bytes()[1].is_ascii_digit() {
        return Value::String(raw.to_string());
    }

    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }

    if let Some(float) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(float);
    }

    Value::String(raw.to_string())
}

fn contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(contains_null),
        Value::Object(map) => map.values().any(contains_null),
        _ => false,
    }
}

impl FromStr for LoaderSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        LoaderSpec::parse(s)
    }
}

impl TryFrom<RawLoader> for LoaderSpec {
    type Error = ConfigError;

    fn try_from(raw: RawLoader) -> Result<Self> {
        match raw {
            RawLoader::Short(spec) => LoaderSpec::parse(&spec),
            RawLoader::Full { loader, options } => {
                // Explicit options win over an inline query.
                let mut spec = LoaderSpec::parse(&loader)?;
                spec.options.extend(options);
                spec.reject_null_options(&loader)?;
                Ok(spec)
            }
        }
    }
}

impl From<LoaderSpec> for RawLoader {
    fn from(spec: LoaderSpec) -> Self {
        if spec.options.is_empty() {
            RawLoader::Short(spec.loader)
        } else {
            RawLoader::Full {
                loader: spec.loader,
                options: spec.options,
            }
        }
    }
}

impl fmt::Display for LoaderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.loader)?;
        if self.options.is_empty() {
            return Ok(());
        }

        let scalar = self
            .options
            .values()
            .all(|v| matches!(v, Value::Bool(_) | Value::Number(_) | Value::String(_)));
        if !scalar {
            let json = serde_json::to_string(&self.options).map_err(|_| fmt::Error)?;
            return write!(f, "?{json}");
        }

        for (i, (key, value)) in self.options.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            match value {
                Value::String(s) => write!(f, "{sep}{key}={s}")?,
                other => write!(f, "{sep}{key}={other}")?,
            }
        }
        Ok(())
    }
}
