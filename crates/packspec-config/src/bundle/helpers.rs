use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Bundle name used when `entry` is a single path
pub(crate) const DEFAULT_ENTRY_NAME: &str = "main";

// Helper defaults
pub(crate) fn default_filename() -> String {
    "[name].js".to_string()
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryInput {
    Single(PathBuf),
    Named(IndexMap<String, PathBuf>),
}

/// Accept both `entry = "src/index.js"` and `[entry] name = "path"`.
pub(crate) fn deserialize_entry<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match EntryInput::deserialize(deserializer)? {
        EntryInput::Single(path) => {
            let mut entries = IndexMap::with_capacity(1);
            entries.insert(DEFAULT_ENTRY_NAME.to_string(), path);
            entries
        }
        EntryInput::Named(entries) => entries,
    })
}
