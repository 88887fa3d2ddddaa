//! Show command implementation.

use crate::cli::{DescriptorFormat, ShowArgs};
use crate::commands::utils;
use crate::error::Result;

/// Print the resolved descriptor to stdout.
pub fn execute(args: ShowArgs) -> Result<()> {
    let loaded = utils::load_config(&args.config)?;

    let rendered = match args.format {
        DescriptorFormat::Toml => loaded.config.to_toml_string()?,
        DescriptorFormat::Json => loaded.config.to_json_string()?,
    };
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
