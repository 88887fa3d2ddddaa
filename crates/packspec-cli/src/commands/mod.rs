//! Command implementations for the packspec CLI.
//!
//! - [`check`] - Descriptor validation
//! - [`show`] - Print the resolved descriptor
//! - [`explain`] - Asset to pipeline resolution
//! - [`emit`] - `webpack.config.js` generation
//! - [`init`] - Descriptor scaffolding
//!
//! Each command provides an `execute` function that takes its parsed
//! arguments and returns a Result.

pub mod check;
pub mod emit;
pub mod explain;
pub mod init;
pub mod show;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use emit::execute as emit_execute;
pub use explain::execute as explain_execute;
pub use init::execute as init_execute;
pub use show::execute as show_execute;
