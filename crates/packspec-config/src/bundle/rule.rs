use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::bundle::loader::LoaderSpec;
use crate::error::{ConfigError, Result};

/// Regular expression matched against asset paths
///
/// Serialized as its source text; two patterns are equal when their
/// sources are.
#[derive(Debug, Clone)]
pub struct MatchPattern {
    source: String,
    regex: Regex,
}

impl MatchPattern {
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = Regex::new(&source).map_err(|e| ConfigError::InvalidPattern {
            pattern: source.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.regex.is_match(&path_key(path))
    }
}

/// Paths are matched with forward slashes on every platform.
pub(crate) fn path_key(path: &Path) -> Cow<'_, str> {
    let raw = path.to_string_lossy();
    if raw.contains('\\') {
        Cow::Owned(raw.replace('\\', "/"))
    } else {
        raw
    }
}

impl PartialEq for MatchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for MatchPattern {}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for MatchPattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        MatchPattern::new(s)
    }
}

impl Serialize for MatchPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for MatchPattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        MatchPattern::new(source).map_err(serde::de::Error::custom)
    }
}

/// Maps matching assets onto a loader pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Assets whose path matches are handled by this rule
    pub test: MatchPattern,

    /// Matching assets that should still be skipped (e.g. `node_modules`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<MatchPattern>,

    /// Loaders applied to the asset, in declaration order
    #[serde(rename = "use")]
    pub loaders: Vec<LoaderSpec>,
}

impl Rule {
    pub fn new(test: MatchPattern, loaders: Vec<LoaderSpec>) -> Self {
        Self {
            test,
            exclude: None,
            loaders,
        }
    }

    pub fn with_exclude(mut self, exclude: MatchPattern) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn applies_to(&self, path: &Path) -> bool {
        self.test.is_match(path)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(path))
    }

    pub fn loader_names(&self) -> Vec<&str> {
        self.loaders.iter().map(LoaderSpec::loader).collect()
    }
}

/// Ordered transform rules (`module.rules`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRules {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl ModuleRules {
    /// First rule that applies to `path`; later matches never contribute.
    pub fn first_match(&self, path: &Path) -> Option<(usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.applies_to(path))
    }

    /// Indices of every rule that applies to `path`, in order
    pub fn all_matches(&self, path: &Path) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.applies_to(path))
            .map(|(index, _)| index)
            .collect()
    }
}
