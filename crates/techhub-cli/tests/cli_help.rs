use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("techhub")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_register_help_shows_all_fields() {
    cargo_bin_cmd!("techhub")
        .args(["register", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--surname"))
        .stdout(predicate::str::contains("--email"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--department"))
        .stdout(predicate::str::contains("--task"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("techhub")
        .arg("--version")
        .assert()
        .success();
}
