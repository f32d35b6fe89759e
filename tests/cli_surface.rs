#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut c = Command::cargo_bin("shiftswap-cli").unwrap();
    c.env("PAGERDUTY_API_TOKEN", "test-token");
    c
}

#[test]
fn help_lists_the_full_surface() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--schedule")
                .and(predicate::str::contains("--current_user_week"))
                .and(predicate::str::contains("--other_username"))
                .and(predicate::str::contains("--other_user_week"))
                .and(predicate::str::contains("--dry-run")),
        );
}

#[test]
fn missing_required_args_fail() {
    cmd()
        .args(["--schedule", "Backend-Oncall"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--current_user_week"));
}

#[test]
fn malformed_date_fails_before_any_network_call() {
    // L'URL pointe vers un port fermé : un appel réseau échouerait autrement
    // avec une erreur de transport, pas une erreur de date.
    cmd()
        .args([
            "--schedule",
            "Backend-Oncall",
            "--current_user_week",
            "04/03/2024",
            "--other_username",
            "jdoe",
            "--other_user_week",
            "2024-03-11",
            "--api-url",
            "http://127.0.0.1:1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid current_user_week date"));
}

#[test]
fn missing_token_is_reported() {
    let mut c = Command::cargo_bin("shiftswap-cli").unwrap();
    c.env_remove("PAGERDUTY_API_TOKEN")
        .args([
            "--schedule",
            "Backend-Oncall",
            "--current_user_week",
            "2024-03-04",
            "--other_username",
            "jdoe",
            "--other_user_week",
            "2024-03-11",
            "--api-url",
            "http://127.0.0.1:1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PAGERDUTY_API_TOKEN"));
}
