//! Typed pieces of a bundler build descriptor.

mod helpers;
mod loader;
mod output;
mod rule;
mod types;

pub use loader::LoaderSpec;
pub use output::{OutputSpec, NAME_PLACEHOLDER};
pub use rule::{MatchPattern, ModuleRules, Rule};
pub use types::{Devtool, Mode};

pub(crate) use helpers::deserialize_entry;
