//! Check command implementation.
//!
//! Validates the descriptor without running the bundler.

use packspec_config::{shadowed_rules, BuildConfig, ConfigValidator, FsValidator, SchemaValidator};
use tracing::debug;

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the descriptor with profile and environment overrides
/// 2. Schema checks (entries, output template, rules, mode-specific options)
/// 3. Filesystem checks unless `--schema-only`
/// 4. Report non-fatal issues if `--warnings`
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking descriptor...");

    let loaded = utils::load_config(&args.config)?;
    let config = &loaded.config;
    debug!(
        entries = config.entry.len(),
        rules = config.module.rules.len(),
        mode = %config.mode,
        "descriptor loaded"
    );

    if args.schema_only {
        SchemaValidator.validate(config)?;
    } else {
        FsValidator::new(loaded.root()).validate(config)?;
        for (name, entry) in &config.entry {
            ui::success(&format!("  {name}: {} exists", entry.display()));
        }
    }

    if args.warnings {
        report_warnings(config);
    }

    ui::success(&format!("{} is valid", loaded.path.display()));
    Ok(())
}

fn report_warnings(config: &BuildConfig) {
    let warnings = collect_warnings(config);
    if warnings.is_empty() {
        ui::info("No warnings found");
    } else {
        ui::warning(&format!("Found {} potential issues:", warnings.len()));
        for warning in warnings {
            ui::warning(&format!("  - {warning}"));
        }
    }
}

fn collect_warnings(config: &BuildConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    for (shadowed, by) in shadowed_rules(&config.module) {
        warnings.push(format!(
            "rule {shadowed} repeats the pattern of rule {by} and never applies"
        ));
    }

    if config.module.rules.is_empty() {
        warnings.push("no loader rules; only plain JavaScript will bundle".to_string());
    }

    if !config.mode.optimizes() && config.devtool.is_none() {
        warnings.push("development mode without a devtool; consider \"eval-source-map\"".to_string());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use packspec_config::{Devtool, LoaderSpec, MatchPattern, Mode, Rule};

    #[test]
    fn example_has_no_warnings() {
        let config = BuildConfig::example().unwrap();
        assert!(collect_warnings(&config).is_empty());
    }

    #[test]
    fn reports_repeated_patterns() {
        let mut config = BuildConfig::example().unwrap();
        config.module.rules.push(Rule::new(
            MatchPattern::new(r"\.css$").unwrap(),
            vec![LoaderSpec::new("raw-loader")],
        ));

        let warnings = collect_warnings(&config);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("rule 2 repeats the pattern of rule 0"));
    }

    #[test]
    fn development_without_devtool_warns() {
        let mut config = BuildConfig::example().unwrap();
        config.mode = Mode::Development;
        assert_eq!(collect_warnings(&config).len(), 1);

        config.devtool = Some(Devtool::new("eval-source-map"));
        assert!(collect_warnings(&config).is_empty());
    }

    #[test]
    fn empty_rules_warn() {
        let mut config = BuildConfig::example().unwrap();
        config.module.rules.clear();
        assert!(collect_warnings(&config)
            .iter()
            .any(|w| w.starts_with("no loader rules")));
    }
}
