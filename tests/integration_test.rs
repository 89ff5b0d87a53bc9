use assert_cmd::Command;
use assert_cmd::cargo;
use chrono::{SubsecRound, Utc};
use datetime_client::timestamp::format_timestamp;
use mockito::Server;

const CONFIG_VARS: &[&str] = &[
    "DATETIME_BASEURL",
    "DATETIME_ENDPOINT",
    "DATETIME_PORT",
    "DATETIME_CONTENT_TYPE",
    "DATETIME_TIMEOUT",
    "DATETIME_MAX_ELAPSED",
];

/// The binary with no configuration inherited from the test environment.
fn client_cmd() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("datetime-client"));
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn port_of(server: &Server) -> String {
    server.socket_address().port().to_string()
}

fn unused_port() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port().to_string()
}

#[test]
fn test_end_to_end_plain_text() {
    let mut server = Server::new();
    let formatted = format_timestamp(&Utc::now().trunc_subsecs(0));

    let mock = server
        .mock("GET", "/datetime")
        .match_header("content-type", "text/plain")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(&formatted)
        .create();

    client_cmd()
        .arg("--base-url")
        .arg("http://127.0.0.1")
        .arg("--port")
        .arg(port_of(&server))
        .assert()
        .success()
        .stdout(predicates::str::contains(formatted.as_str()));

    mock.assert();
}

#[test]
fn test_end_to_end_json() {
    let mut server = Server::new();
    let formatted = format_timestamp(&Utc::now().trunc_subsecs(0));

    let mock = server
        .mock("GET", "/datetime")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&formatted).unwrap())
        .create();

    client_cmd()
        .args(["--base-url", "http://127.0.0.1"])
        .args(["--port", &port_of(&server)])
        .args(["--content-type", "application/json"])
        .assert()
        .success()
        .stdout(predicates::str::contains(formatted.as_str()));

    mock.assert();
}

#[test]
fn test_configuration_from_environment() {
    let mut server = Server::new();
    let formatted = format_timestamp(&Utc::now().trunc_subsecs(0));

    let mock = server
        .mock("GET", "/env/now")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(serde_json::to_string(&formatted).unwrap())
        .create();

    client_cmd()
        .env("DATETIME_BASEURL", "http://127.0.0.1")
        .env("DATETIME_PORT", port_of(&server))
        .env("DATETIME_ENDPOINT", "/env/now")
        .env("DATETIME_CONTENT_TYPE", "application/json")
        .assert()
        .success()
        .stdout(predicates::str::contains(formatted.as_str()));

    mock.assert();
}

#[test]
fn test_flags_override_environment() {
    let mut server = Server::new();
    let formatted = format_timestamp(&Utc::now().trunc_subsecs(0));

    let mock = server
        .mock("GET", "/datetime")
        .with_status(200)
        .with_body(&formatted)
        .create();

    client_cmd()
        .env("DATETIME_BASEURL", "http://127.0.0.1")
        .env("DATETIME_PORT", unused_port())
        .env("DATETIME_ENDPOINT", "/wrong")
        .args(["--port", &port_of(&server)])
        .args(["--endpoint", "/datetime"])
        .assert()
        .success()
        .stdout(predicates::str::contains(formatted.as_str()));

    mock.assert();
}

#[test]
fn test_unsupported_media_type_fails() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/datetime")
        .with_status(415)
        .with_body("Unsupported Media Type\n")
        .expect(1)
        .create();

    client_cmd()
        .args(["--base-url", "http://127.0.0.1"])
        .args(["--port", &port_of(&server)])
        .args(["--content-type", "text/javascript; charset=utf-8"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported Media Type"));

    mock.assert();
}

#[test]
fn test_malformed_body_fails() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/datetime")
        .with_status(200)
        .with_body("tomorrow-ish")
        .expect(1)
        .create();

    client_cmd()
        .args(["--base-url", "http://127.0.0.1"])
        .args(["--port", &port_of(&server)])
        .assert()
        .failure()
        .stderr(predicates::str::contains("cannot parse"));

    mock.assert();
}

#[test]
fn test_unreachable_server_gives_up() {
    client_cmd()
        .args(["--base-url", "http://127.0.0.1"])
        .args(["--port", &unused_port()])
        .args(["--max-elapsed", "1"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to make the request"));
}

#[test]
fn test_invalid_base_url_fails_without_retry() {
    client_cmd()
        .args(["--base-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("invalid client configuration"));
}

#[test]
fn test_version_flag() {
    client_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::starts_with("datetime-client "));
}
