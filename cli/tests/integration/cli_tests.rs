//! Integration tests for the CLI surface: help, version and argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn installer() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agent-installer"));
    cmd.env("NO_COLOR", "1").env_remove("AGENT_INSTALLER_CONFIG");
    cmd
}

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    installer().assert().code(2).stderr(predicate::str::contains(
        "Install, remove and experiment with systemd-managed agent units",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    installer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("experiment"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    installer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent-installer 0.1.0"));
}

#[test]
fn test_experiment_requires_subcommand() {
    installer().arg("experiment").assert().code(2);
}

#[test]
fn test_status_rejects_unknown_channel() {
    installer()
        .args(["status", "--channel", "beta"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'beta'"));
}
