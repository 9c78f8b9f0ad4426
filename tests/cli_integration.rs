//! CLI integration tests for Beacon.
//!
//! These tests verify the full workflow from a configuration file through
//! resolution, translation, and listing.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the beacon binary command.
fn beacon() -> Command {
    Command::cargo_bin("beacon").unwrap()
}

/// Lay out a build tree and a matching configuration file.
///
/// Returns the config path. The tree mimics a checkout whose binary was
/// built under `/build` on another machine:
///
/// ```text
/// <tmp>/proj/src/main.c
/// <tmp>/proj/src/sub/util.c
/// <tmp>/beacon.toml
/// ```
fn write_fixture(tmp: &Path) -> std::path::PathBuf {
    let src = tmp.join("proj/src");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("main.c"), "int main() {}\n").unwrap();
    fs::write(src.join("sub/util.c"), "void util() {}\n").unwrap();

    let config = tmp.join("beacon.toml");
    fs::write(
        &config,
        format!(
            r#"
[[containers]]
type = "mapping"
name = "build host"

[[containers.entries]]
backend = "/build"
local = "{src}"

[[containers]]
type = "directory"
path = "{src}"
nest = true
"#,
            src = src.display()
        ),
    )
    .unwrap();
    config
}

// ============================================================================
// beacon resolve
// ============================================================================

#[test]
fn test_resolve_through_mapping() {
    let tmp = TempDir::new().unwrap();
    let config = write_fixture(tmp.path());

    beacon()
        .args(["--config", config.to_str().unwrap(), "resolve", "/build/main.c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main.c"));
}

#[test]
fn test_resolve_relative_name_in_subfolder() {
    let tmp = TempDir::new().unwrap();
    let config = write_fixture(tmp.path());

    beacon()
        .args(["--config", config.to_str().unwrap(), "resolve", "util.c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sub"));
}

#[test]
fn test_resolve_unknown_name_fails() {
    let tmp = TempDir::new().unwrap();
    let config = write_fixture(tmp.path());

    beacon()
        .args(["--config", config.to_str().unwrap(), "resolve", "nope.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.c"));
}

#[test]
fn test_resolve_json_output() {
    let tmp = TempDir::new().unwrap();
    let config = write_fixture(tmp.path());

    let output = beacon()
        .args([
            "--config",
            config.to_str().unwrap(),
            "resolve",
            "--json",
            "/build/main.c",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed.get("Found").is_some());
}

// ============================================================================
// beacon translate
// ============================================================================

#[test]
fn test_translate_back_to_backend_path() {
    let tmp = TempDir::new().unwrap();
    let config = write_fixture(tmp.path());
    let local = tmp.path().join("proj/src/main.c");

    beacon()
        .args([
            "--config",
            config.to_str().unwrap(),
            "translate",
            local.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("/build/main.c"));
}

// ============================================================================
// beacon list
// ============================================================================

#[test]
fn test_list_shows_containers_in_order() {
    let tmp = TempDir::new().unwrap();
    let config = write_fixture(tmp.path());

    beacon()
        .args(["--config", config.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("mapping")
                .and(predicate::str::contains("directory"))
                .and(predicate::str::contains("first match wins")),
        );
}

#[test]
fn test_list_reports_unknown_container_types() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("src")).unwrap();
    let config = tmp.path().join("beacon.toml");
    fs::write(
        &config,
        format!(
            r#"
[[containers]]
type = "directory"
path = "{}"

[[containers]]
type = "wiretap"
"#,
            tmp.path().join("src").display()
        ),
    )
    .unwrap();

    beacon()
        .args(["--config", config.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("wiretap"));
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("absent.toml");

    beacon()
        .args(["--config", config.to_str().unwrap(), "resolve", "a.c"])
        .assert()
        .failure();
}
