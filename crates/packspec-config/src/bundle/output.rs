use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::bundle::helpers::{default_filename, default_output_dir};

/// Placeholder replaced by the bundle name in `output.filename`
pub const NAME_PLACEHOLDER: &str = "[name]";

/// Where and under which name bundles are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// File name template, e.g. `bundle.js` or `[name].js`
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Output directory (absolute once the descriptor is anchored)
    #[serde(default = "default_output_dir")]
    pub path: PathBuf,
}

impl OutputSpec {
    pub fn new(filename: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
        }
    }

    pub fn has_name_placeholder(&self) -> bool {
        self.filename.contains(NAME_PLACEHOLDER)
    }

    /// Render the file name for one bundle
    pub fn render_filename(&self, bundle: &str) -> String {
        self.filename.replace(NAME_PLACEHOLDER, bundle)
    }
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            path: default_output_dir(),
        }
    }
}
