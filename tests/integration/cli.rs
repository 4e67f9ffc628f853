use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::TestProject;
use dtr_cli::test_utils::DocumentFixture;

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("dtr")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("--document"));
}

#[test]
fn test_version() {
    Command::cargo_bin("dtr")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dtr "));
}

#[test]
fn test_verbose_logs_loading() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();

    Command::cargo_bin("dtr")
        .unwrap()
        .current_dir(project.project_path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(["--verbose", "lookup", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("colors.accent"))
        .stderr(predicate::str::contains("Loading tokens from"));
}

#[test]
fn test_config_from_environment() {
    let project = TestProject::with_document(&DocumentFixture::theme()).unwrap();
    project.write_file("alt.toml", "prefix = \"env\"\n").unwrap();

    Command::cargo_bin("dtr")
        .unwrap()
        .current_dir(project.project_path())
        .env("NO_COLOR", "1")
        .env("DTR_CONFIG", "alt.toml")
        .args(["lookup", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("env.colors.accent"));
}
