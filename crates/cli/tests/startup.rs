use assert_cmd::prelude::*;
use std::process::Command;

#[test]
fn missing_api_key_is_fatal() {
    Command::new(assert_cmd::cargo::cargo_bin!("renumber-outline"))
        .env_remove("NOTION_API_KEY")
        .args(["--dry-run", "Logbook"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("NOTION_API_KEY is not set"));
}

#[test]
fn blank_api_key_is_fatal() {
    Command::new(assert_cmd::cargo::cargo_bin!("renumber-outline"))
        .env("NOTION_API_KEY", "  ")
        .args(["--page-id", "abc"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("NOTION_API_KEY"));
}

#[test]
fn title_or_page_id_is_required() {
    Command::new(assert_cmd::cargo::cargo_bin!("renumber-outline"))
        .env("NOTION_API_KEY", "secret")
        .assert()
        .failure()
        .stderr(predicates::str::contains("required"));
}

#[test]
fn title_and_page_id_conflict() {
    Command::new(assert_cmd::cargo::cargo_bin!("renumber-outline"))
        .env("NOTION_API_KEY", "secret")
        .args(["Logbook", "--page-id", "abc"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("cannot be used with"));
}

#[test]
fn unreachable_api_aborts_the_run() {
    Command::new(assert_cmd::cargo::cargo_bin!("renumber-outline"))
        .env("NOTION_API_KEY", "secret")
        .env("NOTION_API_BASE_URL", "http://127.0.0.1:1/v1")
        .args(["--page-id", "abc", "--quiet"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Renumbering aborted"));
}
