//! Explain command implementation.
//!
//! Resolves asset paths against `module.rules` with first-match semantics
//! and prints the loader pipeline each one gets.

use std::path::PathBuf;

use packspec_config::{explain, Resolution};
use walkdir::WalkDir;

use crate::cli::ExplainArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the explain command.
pub fn execute(args: ExplainArgs) -> Result<()> {
    let loaded = utils::load_config(&args.config)?;

    let mut paths = args.paths.clone();
    if let Some(dir) = &args.dir {
        paths.extend(collect_files(dir)?);
    }

    let resolutions = explain(&loaded.config, &paths);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolutions)?);
        return Ok(());
    }

    for resolution in &resolutions {
        println!("{}", render(resolution));
    }

    let unmatched = resolutions.iter().filter(|r| !r.is_matched()).count();
    if unmatched > 0 {
        ui::warning(&format!("{unmatched} path(s) match no rule"));
    }
    Ok(())
}

/// Regular files under `dir`, in a stable order
fn collect_files(dir: &std::path::Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn render(resolution: &Resolution) -> String {
    let path = resolution.path.display();
    match resolution.rule {
        None => format!("{path} -> (no rule)"),
        Some(rule) => {
            let mut line = format!("{path} -> rule {rule}: {}", resolution.loaders.join(" ! "));
            if !resolution.shadowed.is_empty() {
                let shadowed: Vec<String> =
                    resolution.shadowed.iter().map(ToString::to_string).collect();
                line.push_str(&format!(" (shadows {})", shadowed.join(", ")));
            }
            line
        }
    }
}
