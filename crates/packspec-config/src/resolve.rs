//! Which pipeline an asset path resolves to.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::config::BuildConfig;

/// Outcome of matching one asset path against `module.rules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub path: PathBuf,
    /// Index of the winning rule
    pub rule: Option<usize>,
    /// Loader identifiers of the winning rule, in order
    pub loaders: Vec<String>,
    /// Later rules that also match but never apply
    pub shadowed: Vec<usize>,
}

impl Resolution {
    pub fn is_matched(&self) -> bool {
        self.rule.is_some()
    }
}

/// Resolve each path with first-match semantics.
///
/// # Example
///
/// ```
/// use packspec_config::{explain, BuildConfig};
///
/// let config = BuildConfig::example().unwrap();
/// let resolved = explain(&config, ["styles/site.css", "fonts/a.woff2"]);
/// assert_eq!(resolved[0].loaders, vec!["style-loader", "css-loader"]);
/// assert_eq!(resolved[1].loaders, vec!["url-loader?limit=100000"]);
/// ```
pub fn explain<I, P>(config: &BuildConfig, paths: I) -> Vec<Resolution>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| resolve_one(config, path.as_ref()))
        .collect()
}

fn resolve_one(config: &BuildConfig, path: &Path) -> Resolution {
    let matches = config.module.all_matches(path);
    let Some((&winner, rest)) = matches.split_first() else {
        return Resolution {
            path: path.to_path_buf(),
            rule: None,
            loaders: Vec::new(),
            shadowed: Vec::new(),
        };
    };

    if !rest.is_empty() {
        warn!(path = %path.display(), winner, shadowed = ?rest, "overlapping rule patterns");
    }

    Resolution {
        path: path.to_path_buf(),
        rule: Some(winner),
        loaders: config.module.rules[winner]
            .loaders
            .iter()
            .map(ToString::to_string)
            .collect(),
        shadowed: rest.to_vec(),
    }
}
