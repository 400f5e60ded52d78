//! Integration tests for the `dwh` CLI binary.
//!
//! These tests validate argument parsing, help output, and error
//! handling without a live warehouse; the end-to-end tests run the
//! binary against a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `dwh` binary with env isolation.
///
/// Clears all `DWH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn dwh_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dwh");
    cmd.env("HOME", "/tmp/dwh-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/dwh-cli-test-nonexistent")
        .env_remove("DWH_PROFILE")
        .env_remove("DWH_API_URL")
        .env_remove("DWH_API_KEY")
        .env_remove("DWH_OUTPUT")
        .env_remove("DWH_INSECURE")
        .env_remove("DWH_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = dwh_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    dwh_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Data Warehouse")
            .and(predicate::str::contains("relays"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    dwh_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dwh"));
}

#[test]
fn test_config_path_prints_a_path() {
    dwh_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Validation errors (no warehouse needed) ─────────────────────────

#[test]
fn test_missing_date_range_is_a_usage_error() {
    let output = dwh_cmd()
        .args([
            "relays",
            "portal-apps",
            "--url",
            "http://127.0.0.1:9",
            "--api-key",
            "test-key",
            "app_1",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("date range"),
        "Expected date range error in:\n{text}"
    );
}

#[test]
fn test_invalid_date_is_a_usage_error() {
    let output = dwh_cmd()
        .args([
            "relays",
            "accounts",
            "--url",
            "http://127.0.0.1:9",
            "--api-key",
            "test-key",
            "--from",
            "not-a-date",
            "--to",
            "2023-09-04",
            "acct_1",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("invalid date"),
        "Expected invalid date error in:\n{text}"
    );
}

#[test]
fn test_missing_url_reports_missing_config() {
    let output = dwh_cmd()
        .args(["relays", "portal-apps", "--from", "2023-08-04", "--to", "2023-09-04", "app_1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("No warehouse URL configured"),
        "Expected missing config error in:\n{text}"
    );
}

// ── End-to-end against wiremock ─────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_portal_app_relays_end_to_end_json() {
    let server = MockServer::start().await;

    let body = json!({
        "data": [{
            "categoryValue": "44c0823fbdf0aed3fa2d6357",
            "countTotal": 10,
            "avgLatency": 120.5,
            "rateError": 0.01,
            "rateSuccess": 0.99,
            "from": "2023-08-04",
            "to": "2023-09-04"
        }]
    });

    Mock::given(method("GET"))
        .and(path("/analytics/relays/total/application_id"))
        .and(query_param("from", "2023-08-04"))
        .and(query_param("to", "2023-09-04"))
        .and(header("Portal-DWH-Service-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        dwh_cmd()
            .args([
                "relays",
                "portal-apps",
                "--url",
                &uri,
                "--api-key",
                "test-key",
                "--from",
                "2023-08-04",
                "--to",
                "2023-09-04",
                "-o",
                "json",
                "44c0823fbdf0aed3fa2d6357",
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""portalAppId": "44c0823fbdf0aed3fa2d6357""#));
    assert!(stdout.contains(r#""count": 10"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_404_maps_to_not_found_exit_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/relays/total/account_id"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "nope" })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        dwh_cmd()
            .args([
                "relays",
                "accounts",
                "--url",
                &uri,
                "--api-key",
                "test-key",
                "--from",
                "2023-08-04",
                "--to",
                "2023-09-04",
                "acct_1",
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    let text = combined_output(&output);
    assert!(text.contains("not found"), "Expected not-found error in:\n{text}");
}
