//! End-to-end tests for the `packspec` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn packspec(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("packspec").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PACKSPEC_MODE")
        .env_remove("PACKSPEC_OUTPUT__PATH")
        .env_remove("PACKSPEC_OUTPUT__FILENAME");
    cmd
}

fn scaffolded() -> TempDir {
    let dir = TempDir::new().unwrap();
    packspec(dir.path()).arg("init").assert().success();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/bundle.js"), "require('./site.css');\n").unwrap();
    dir
}

#[test]
fn init_writes_descriptor() {
    let dir = TempDir::new().unwrap();
    packspec(dir.path())
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    let written = fs::read_to_string(dir.path().join("packspec.toml")).unwrap();
    assert!(written.contains("mode = \"production\""));
    assert!(written.contains("resources/public/js"));
}

#[test]
fn init_refuses_existing_descriptor() {
    let dir = scaffolded();
    packspec(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    packspec(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn check_passes_for_scaffolded_project() {
    let dir = scaffolded();
    packspec(dir.path())
        .args(["check", "--warnings"])
        .assert()
        .success()
        .stderr(predicate::str::contains("is valid"));
}

#[test]
fn check_reports_missing_entry() {
    let dir = TempDir::new().unwrap();
    packspec(dir.path()).arg("init").assert().success();

    packspec(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    packspec(dir.path())
        .args(["check", "--schema-only"])
        .assert()
        .success();
}

#[test]
fn missing_descriptor_is_an_error() {
    let dir = TempDir::new().unwrap();
    packspec(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no packspec config found"));
}

#[test]
fn show_prints_anchored_json() {
    let dir = scaffolded();
    let output = packspec(dir.path())
        .args(["show", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let out_path = value["output"]["path"].as_str().unwrap();
    assert!(Path::new(out_path).is_absolute());
    assert!(out_path.ends_with("resources/public/js"));
    assert_eq!(value["entry"].as_object().unwrap().len(), 1);
}

#[test]
fn profile_overrides_mode() {
    let dir = scaffolded();
    let mut source = fs::read_to_string(dir.path().join("packspec.toml")).unwrap();
    source.push_str("\n[profiles.development]\nmode = \"development\"\ndevtool = \"eval-source-map\"\n");
    fs::write(dir.path().join("packspec.toml"), source).unwrap();

    packspec(dir.path())
        .args(["show", "--profile", "development"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode = \"development\""))
        .stdout(predicate::str::contains("eval-source-map"));

    packspec(dir.path())
        .args(["show", "--profile", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn explain_uses_first_matching_rule() {
    let dir = scaffolded();
    packspec(dir.path())
        .args(["explain", "styles/site.css", "fonts/icons.woff2", "README.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "styles/site.css -> rule 0: style-loader ! css-loader",
        ))
        .stdout(predicate::str::contains(
            "fonts/icons.woff2 -> rule 1: url-loader?limit=100000",
        ))
        .stdout(predicate::str::contains("README.md -> (no rule)"));
}

#[test]
fn explain_json_lists_resolutions() {
    let dir = scaffolded();
    let output = packspec(dir.path())
        .args(["explain", "--json", "site.css"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["rule"], 0);
    assert_eq!(value[0]["loaders"][1], "css-loader");
}

#[test]
fn emit_writes_webpack_config() {
    let dir = scaffolded();
    packspec(dir.path())
        .arg("emit")
        .assert()
        .success()
        .stdout(predicate::str::contains("module.exports = {"))
        .stdout(predicate::str::contains("test: /\\.css$/"));

    packspec(dir.path())
        .args(["emit", "--out", "webpack.config.js"])
        .assert()
        .success();
    let emitted = fs::read_to_string(dir.path().join("webpack.config.js")).unwrap();
    assert!(emitted.contains("filename: \"bundle.js\""));
}

#[test]
fn quiet_check_prints_nothing_on_success() {
    let dir = scaffolded();
    packspec(dir.path())
        .args(["-q", "check", "--warnings"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn quiet_still_reports_errors() {
    let dir = TempDir::new().unwrap();
    packspec(dir.path())
        .args(["-q", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no packspec config found"));
}

#[test]
fn emit_refuses_patterns_javascript_reads_differently() {
    let dir = scaffolded();
    fs::write(
        dir.path().join("packspec.toml"),
        r#"mode = "production"

[entry]
bundle = "./src/bundle.js"

[output]
filename = "bundle.js"
path = "dist"

[[module.rules]]
test = '\.css\z(?s)'
use = ["style-loader", "css-loader"]
"#,
    )
    .unwrap();

    for args in [&["emit"][..], &["emit", "--no-check"][..]] {
        packspec(dir.path())
            .args(args)
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("invalid match pattern"));
    }
}
