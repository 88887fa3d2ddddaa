//! Serializing a descriptor and reading it back yields the same value.

use packspec_config::{BuildConfig, Devtool, LoaderSpec, MatchPattern, Mode, OutputSpec, Rule};
use serde_json::json;

fn rich_config() -> BuildConfig {
    let mut config = BuildConfig::example().unwrap();
    config.mode = Mode::Development;
    config.devtool = Some(Devtool::new("eval-source-map"));
    config.entry.insert("admin".into(), "./src/admin.js".into());
    config.output = OutputSpec::new("[name].js", "/project/resources/public/js");
    config.module.rules.push(
        Rule::new(
            MatchPattern::new(r"\.m?js$").unwrap(),
            vec![LoaderSpec::new("babel-loader")
                .with_option("cacheDirectory", true)
                .with_option("presets", json!(["@babel/preset-env"]))],
        )
        .with_exclude(MatchPattern::new("node_modules").unwrap()),
    );
    config
        .profiles
        .insert("production".into(), json!({ "mode": "production" }));
    config
}

#[test]
fn toml_round_trip() {
    for config in [BuildConfig::example().unwrap(), rich_config()] {
        let text = config.to_toml_string().unwrap();
        let parsed = BuildConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config, "TOML was:\n{text}");
    }
}

#[test]
fn json_round_trip() {
    for config in [BuildConfig::example().unwrap(), rich_config()] {
        let text = config.to_json_string().unwrap();
        let parsed = BuildConfig::from_json_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}

#[test]
fn round_trip_keeps_rule_and_entry_order() {
    let config = rich_config();
    let parsed = BuildConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();

    let names: Vec<&String> = parsed.entry.keys().collect();
    assert_eq!(names, vec!["bundle", "admin"]);

    let tests: Vec<&str> = parsed.module.rules.iter().map(|r| r.test.as_str()).collect();
    assert_eq!(tests, vec![r"\.css$", r"\.(png|woff|woff2|eot|ttf|svg)$", r"\.m?js$"]);
}

#[test]
fn query_shorthand_is_written_in_object_form() {
    let config = BuildConfig::example().unwrap();
    let value: serde_json::Value = serde_json::from_str(&config.to_json_string().unwrap()).unwrap();
    assert_eq!(
        value["module"]["rules"][1]["use"],
        json!([{ "loader": "url-loader", "options": { "limit": 100000 } }])
    );
}

#[test]
fn json_descriptor_with_null_option_is_rejected() {
    let source = r#"{
        "mode": "production",
        "entry": { "bundle": "./src/bundle.js" },
        "module": { "rules": [
            { "test": "\\.png$", "use": [{ "loader": "url-loader", "options": { "fallback": null } }] }
        ] }
    }"#;

    let err = BuildConfig::from_json_str(source).unwrap_err();
    assert!(err.to_string().contains("'fallback' is null"), "{err}");
}

#[test]
fn json_loaded_options_survive_toml() {
    let source = r#"{
        "mode": "production",
        "entry": { "bundle": "./src/bundle.js" },
        "module": { "rules": [
            { "test": "\\.png$", "use": [
                { "loader": "url-loader", "options": { "fallback": { "loader": "file-loader", "options": { "name": "[hash].[ext]" } } } }
            ] }
        ] }
    }"#;

    let config = BuildConfig::from_json_str(source).unwrap();
    let parsed = BuildConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
    assert_eq!(parsed, config);
}
