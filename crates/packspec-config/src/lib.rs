pub mod bundle;
pub mod config;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod resolve;
pub mod validation;

// Re-export main types
pub use bundle::*;
pub use config::*;
pub use error::*;

// Re-export discovery, resolution and validation
pub use discovery::{discover, discover_with_profile, load_file, ConfigDiscovery};
pub use emit::webpack_module;
pub use resolve::{explain, Resolution};
pub use validation::{
    shadowed_rules, validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator,
};
