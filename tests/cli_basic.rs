//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and each subcommand
//! responds to `--help` with appropriate text.

#![allow(deprecated)] // cargo_bin is deprecated in favor of cargo_bin!

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `vembed` binary.
fn vembed() -> Command {
    Command::cargo_bin("vembed").expect("binary 'vembed' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    vembed()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: vembed"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("providers"));
}

#[test]
fn version_flag_shows_semver() {
    vembed()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^vembed \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    vembed()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: vembed"));
}

#[test]
fn invalid_subcommand_fails() {
    vembed()
        .arg("this-is-not-a-real-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ─── Subcommand help ─────────────────────────────────────────────────────────

#[test]
fn resolve_help() {
    vembed()
        .args(["resolve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolve one or more video URLs"))
        .stdout(predicate::str::contains("<URLS>"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--no-cache"));
}

#[test]
fn providers_help() {
    vembed()
        .args(["providers", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oEmbed endpoints"));
}

// ─── Subcommand argument validation ──────────────────────────────────────────

#[test]
fn resolve_missing_url_fails() {
    vembed()
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<URLS>"));
}

#[test]
fn resolve_rejects_unknown_format() {
    vembed()
        .args(["resolve", "--format", "xml", "https://youtu.be/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
