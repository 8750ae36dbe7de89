//! CLI help output integration tests

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_root_help() {
    Command::cargo_bin("padron")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Roster importer for Supabase Auth and profile tables",
        ));
}

#[test]
fn test_import_help() {
    Command::cargo_bin("padron")
        .unwrap()
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ROSTER FORMATS"))
        .stdout(predicate::str::contains("--synthesize-all"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("padron")
        .unwrap()
        .arg("export")
        .assert()
        .failure();
}
