//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, each subcommand
//! responds to `--help`, and bad input fails with a useful message.

#![allow(deprecated)] // cargo_bin deprecation; replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper: get a Command for the `slidesplit` binary with an isolated home.
fn slidesplit(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("slidesplit").expect("binary 'slidesplit' should be built");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: slidesplit"))
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag_shows_semver() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^slidesplit \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: slidesplit"));
}

#[test]
fn invalid_subcommand_fails() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn split_help() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .args(["split", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--zoom"))
        .stdout(predicate::str::contains("--min-area"))
        .stdout(predicate::str::contains("--regions"));
}

#[test]
fn detect_help() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .args(["detect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn config_help() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--threshold"));
}

// ─── Argument validation ─────────────────────────────────────────────────────

#[test]
fn split_missing_input_fails() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .arg("split")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<INPUT>"));
}

#[test]
fn split_nonexistent_input_fails() {
    let home = TempDir::new().unwrap();
    let output = home.path().join("out.pdf");
    slidesplit(&home)
        .args(["split", "-q", "-o"])
        .arg(&output)
        .arg(home.path().join("missing.pdf"))
        .assert()
        .failure();
    assert!(!output.exists());
}

#[test]
fn detect_nonexistent_input_fails() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .arg("detect")
        .arg(home.path().join("missing.pdf"))
        .assert()
        .failure();
}

#[test]
fn non_numeric_threshold_fails() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .args(["config", "--threshold", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn threshold_above_255_fails() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .args(["config", "--threshold", "300"])
        .assert()
        .failure();
}

#[test]
fn zero_zoom_is_rejected() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .args(["config", "--zoom", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zoom_x"));
}

#[test]
fn zero_regions_is_rejected() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .args(["config", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("regions_per_page"));
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[test]
fn config_prints_defaults() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("showing defaults"))
        .stdout(predicate::str::contains("[detector]"))
        .stdout(predicate::str::contains("min_area = 80000"))
        .stdout(predicate::str::contains("regions_per_page = 2"));
}

#[test]
fn config_flags_override_defaults() {
    let home = TempDir::new().unwrap();
    slidesplit(&home)
        .args(["config", "--zoom", "2", "--zoom-y", "3", "-t", "80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zoom_x = 2.0"))
        .stdout(predicate::str::contains("zoom_y = 3.0"))
        .stdout(predicate::str::contains("threshold = 80"));
}

#[test]
fn explicit_config_file_is_loaded() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    std::fs::write(&path, "[detector]\nmin_area = 1234\n\n[splitter]\nregions_per_page = 3\n")
        .unwrap();
    slidesplit(&home)
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("loaded from"))
        .stdout(predicate::str::contains("min_area = 1234"))
        .stdout(predicate::str::contains("regions_per_page = 3"))
        .stdout(predicate::str::contains("threshold = 50"));
}

#[test]
fn unknown_config_key_fails() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.toml");
    std::fs::write(&path, "[detector]\nblur = 3\n").unwrap();
    slidesplit(&home)
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.toml"));
}
