//! Command-line interface definition for packspec.
//!
//! # Command Structure
//!
//! - `packspec check` - Validate the descriptor (schema and filesystem)
//! - `packspec show` - Print the resolved descriptor as TOML or JSON
//! - `packspec explain` - Show which pipeline assets resolve to
//! - `packspec emit` - Write the bundler's `webpack.config.js`
//! - `packspec init` - Scaffold `packspec.toml`

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{CheckArgs, Command, ConfigArgs, EmitArgs, ExplainArgs, InitArgs, ShowArgs};
pub use enums::*;

/// packspec - typed build descriptors for JavaScript bundlers
#[derive(Parser, Debug)]
#[command(
    name = "packspec",
    version,
    about = "Typed build descriptors for JavaScript bundlers",
    long_about = "packspec loads a bundler build descriptor (entries, output, mode and loader rules),\n\
                  validates it before the bundler runs, explains which loader pipeline an asset\n\
                  resolves to, and emits the webpack.config.js the bundler consumes."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
