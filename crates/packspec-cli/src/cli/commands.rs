use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::DescriptorFormat;

/// Available packspec subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the descriptor
    ///
    /// Checks the schema (entries, output template, rules, mode-specific
    /// options) and then that entries exist and the output directory is
    /// writable.
    Check(CheckArgs),

    /// Print the resolved descriptor
    ///
    /// Shows the descriptor after profile and environment overrides, with
    /// paths anchored to the config file's directory.
    Show(ShowArgs),

    /// Show which loader pipeline assets resolve to
    ///
    /// Rules are matched in order and the first match wins. Later rules that
    /// also match are reported as shadowed.
    Explain(ExplainArgs),

    /// Write the bundler's webpack.config.js
    Emit(EmitArgs),

    /// Create a packspec.toml with the default single-bundle layout
    Init(InitArgs),
}

/// Options shared by every command that loads a descriptor
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Descriptor file (default: discover packspec.toml, packspec.json or package.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profile to apply on top of the base descriptor
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Skip filesystem checks (entries, output directory)
    #[arg(long)]
    pub schema_only: bool,

    /// Report non-fatal issues such as shadowed rules
    #[arg(short, long)]
    pub warnings: bool,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: DescriptorFormat,
}

/// Arguments for the explain command
#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Asset paths to resolve
    #[arg(value_name = "PATH", required_unless_present = "dir")]
    pub paths: Vec<PathBuf>,

    /// Resolve every file under this directory as well
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Print resolutions as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the emit command
#[derive(Args, Debug)]
pub struct EmitArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Skip validation before emitting
    #[arg(long)]
    pub no_check: bool,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create packspec.toml in
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Overwrite an existing packspec.toml
    #[arg(long)]
    pub force: bool,
}
