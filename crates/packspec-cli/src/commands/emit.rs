//! Emit command implementation.

use std::fs;

use packspec_config::{validate_schema, webpack_module};
use tracing::debug;

use crate::cli::EmitArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Render the descriptor as `webpack.config.js`, to `--out` or stdout.
pub fn execute(args: EmitArgs) -> Result<()> {
    let loaded = utils::load_config(&args.config)?;
    if !args.no_check {
        validate_schema(&loaded.config)?;
    }

    let source = webpack_module(&loaded.config)?;

    match &args.out {
        Some(out) => {
            let out = utils::resolve_path(out, &std::env::current_dir()?);
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&out, &source)?;
            debug!(path = %out.display(), bytes = source.len(), "wrote bundler config");
            ui::success(&format!("Wrote {}", out.display()));
        }
        None => print!("{source}"),
    }
    Ok(())
}
