//! Integration tests for the `marsly` CLI binary.
//!
//! Listing commands run against a local wiremock server via `--api-url`;
//! nothing here touches the real API or the user's configuration.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `marsly` binary with env isolation.
fn marsly_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("marsly");
    cmd.env("HOME", "/tmp/marsly-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/marsly-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("MARSLY_API_URL")
        .env_remove("MARSLY_CONFIG")
        .env_remove("MARSLY_OUTPUT")
        .env_remove("MARSLY_TIMEOUT")
        .env_remove("MARSLY_API__BASE_URL");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn all_listings() -> serde_json::Value {
    json!([
        {
            "id": "424906",
            "img_src": "http://mars.jpl.nasa.gov/msl-raw-images/a.jpg",
            "type": "rent",
            "price": 87000
        },
        {
            "id": "424905",
            "img_src": "http://mars.jpl.nasa.gov/msl-raw-images/b.jpg",
            "type": "buy",
            "price": 8000000
        }
    ])
}

async fn serve(filter: &str, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/realestate"))
        .and(query_param("filter", filter))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = marsly_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    marsly_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Mars real-estate")
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    marsly_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("marsly"));
}

#[test]
fn test_unknown_filter_is_usage_error() {
    marsly_cmd()
        .args(["list", "--filter", "lease"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    marsly_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    marsly_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── list ────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_fetches_all_by_default() {
    let server = serve("all", all_listings()).await;

    let output = marsly_cmd()
        .args(["list", "-o", "json", "--api-url", &server.uri()])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let listed: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = listed.iter().map(|l| l["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["424906", "424905"]);
    assert_eq!(listed[0]["type"], "rent");
    assert_eq!(listed[1]["price"].as_f64(), Some(8_000_000.0));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_with_filter_requests_only_that_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/realestate"))
        .and(query_param("filter", "rent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "424906",
            "img_src": "http://mars.jpl.nasa.gov/msl-raw-images/a.jpg",
            "type": "rent",
            "price": 87000
        }])))
        .expect(1)
        .mount(&server)
        .await;

    marsly_cmd()
        .args(["list", "--filter", "rent", "-o", "plain", "--api-url", &server.uri()])
        .assert()
        .success()
        .stdout("424906\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_table_shows_display_values() {
    let server = serve("all", all_listings()).await;

    marsly_cmd()
        .args(["list", "--api-url", &server.uri()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("For Rent")
                .and(predicate::str::contains("$87,000/month"))
                .and(predicate::str::contains("For Sale"))
                .and(predicate::str::contains("$8,000,000")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_server_error_exits_with_fetch_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/realestate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("dust storm"))
        .mount(&server)
        .await;

    marsly_cmd()
        .args(["list", "--filter", "rent", "--api-url", &server.uri()])
        .assert()
        .code(9)
        .stderr(predicate::str::contains("Fetching rent listings"));
}

#[test]
fn test_list_unreachable_api_exits_with_fetch_code() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    marsly_cmd()
        .args(["list", "--api-url", &format!("http://127.0.0.1:{port}/")])
        .assert()
        .code(9);
}

#[test]
fn test_list_rejects_non_http_api_url() {
    marsly_cmd()
        .args(["list", "--api-url", "ftp://mars.example/"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("api.base_url"));
}

#[test]
fn test_list_with_missing_ca_cert_reports_client_setup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marsly.toml");
    std::fs::write(&path, "[api]\nca_cert = \"/nonexistent/marsly-ca.pem\"\n").unwrap();

    marsly_cmd()
        .args(["list", "--config"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("marsly::client_setup")
                .and(predicate::str::contains("/nonexistent/marsly-ca.pem")),
        );
}

// ── show ────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_show_renders_detail() {
    let server = serve("all", all_listings()).await;

    marsly_cmd()
        .args(["show", "424905", "--api-url", &server.uri()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ID:     424905")
                .and(predicate::str::contains("For Sale"))
                .and(predicate::str::contains("$8,000,000")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_json_detail() {
    let server = serve("all", all_listings()).await;

    let output = marsly_cmd()
        .args(["show", "424906", "-o", "json", "--api-url", &server.uri()])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let detail: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(detail["id"], "424906");
    assert_eq!(detail["kind"], "Rent");
    assert_eq!(detail["price"], "$87,000/month");
    assert_eq!(detail["type_label"], "For Rent");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_unknown_id_exits_not_found() {
    let server = serve("all", all_listings()).await;

    marsly_cmd()
        .args(["show", "999999", "--api-url", &server.uri()])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("999999"));
}

// ── watch ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_prints_observed_changes() {
    let server = serve("buy", all_listings()).await;

    let output = marsly_cmd()
        .args([
            "watch",
            "--filter",
            "buy",
            "--count",
            "1",
            "--interval",
            "60",
            "-o",
            "json-compact",
            "--api-url",
            &server.uri(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect();
    assert_eq!(
        lines,
        vec![
            r#"{"event":"status","status":"loading"}"#,
            r#"{"event":"status","status":"done"}"#,
            r#"{"event":"listings","count":2}"#,
        ]
    );
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marsly.toml");

    marsly_cmd()
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("marsly.toml"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marsly.toml");

    marsly_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[api]"));

    marsly_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    marsly_cmd()
        .args(["config", "init", "--force", "--config"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_config_show_merges_file_env_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marsly.toml");
    std::fs::write(&path, "[store]\ndefault_filter = \"rent\"\n").unwrap();

    marsly_cmd()
        .env("MARSLY_API__TIMEOUT", "12")
        .args(["config", "show", "--latest-only", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("default_filter = \"rent\"")
                .and(predicate::str::contains("timeout = 12"))
                .and(predicate::str::contains("ordering = \"latest-requested\"")),
        );
}
