use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Build profile handed to the bundler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Readable output, fast rebuilds
    #[serde(alias = "dev")]
    Development,
    /// Minified, optimized output (bundler default)
    #[default]
    #[serde(alias = "prod")]
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    /// Whether the bundler minifies and optimizes in this mode
    pub fn optimizes(&self) -> bool {
        matches!(self, Mode::Production)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!(
                "unknown mode '{other}' (expected 'development' or 'production')"
            )),
        }
    }
}

/// Source map style (`devtool` in the bundler's own vocabulary)
///
/// Kept as the raw style name so new bundler variants pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Devtool(String);

impl Devtool {
    pub fn new(style: impl Into<String>) -> Self {
        Self(style.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Eval-wrapped and inline maps are only meant for local development.
    pub fn is_development_only(&self) -> bool {
        self.0.starts_with("eval") || self.0.contains("inline")
    }

    /// Hidden and sourceless maps only make sense for shipped builds.
    pub fn is_production_only(&self) -> bool {
        self.0.starts_with("hidden-") || self.0.starts_with("nosources-")
    }
}

impl fmt::Display for Devtool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_aliases() {
        assert_eq!("dev".parse::<Mode>().unwrap(), Mode::Development);
        assert_eq!(" Production ".parse::<Mode>().unwrap(), Mode::Production);
        assert!("none".parse::<Mode>().is_err());
    }

    #[test]
    fn production_is_default_and_optimizes() {
        assert_eq!(Mode::default(), Mode::Production);
        assert!(Mode::Production.optimizes());
        assert!(!Mode::Development.optimizes());
    }

    #[test]
    fn devtool_classification() {
        assert!(Devtool::new("eval-source-map").is_development_only());
        assert!(Devtool::new("inline-cheap-source-map").is_development_only());
        assert!(Devtool::new("hidden-source-map").is_production_only());
        assert!(Devtool::new("nosources-source-map").is_production_only());

        let plain = Devtool::new("source-map");
        assert!(!plain.is_development_only());
        assert!(!plain.is_production_only());
    }
}
