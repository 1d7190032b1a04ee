//! End-to-end tests of the binary contract: argv in, exactly one JSON line
//! on stdout, success or failure in the exit code.

#![cfg(feature = "emulation")]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::process::{Command, Output};
use std::thread;
use std::time::{Duration, Instant};

fn bridge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fetch-cli"))
}

fn run_bridge(args: &[&str]) -> Output {
    bridge().args(args).output().unwrap()
}

/// Asserts stdout is exactly one line and parses it as JSON.
fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    let mut lines = stdout.lines();
    let line = lines.next().expect("expected one line on stdout");
    assert!(
        lines.next().is_none(),
        "expected exactly one line on stdout, got: {stdout:?}"
    );
    serde_json::from_str(line).unwrap()
}

/// Serves one connection with a canned HTTP/1.1 response on a background
/// thread and returns the listening address.
fn spawn_one_shot_server(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            // Drain the request head; the bridge sends no body for GET.
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
        }
    });
    addr
}

/// Serves one connection that reads the request head and then never
/// responds, holding the socket open (for timeout tests).
fn spawn_stalled_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            thread::sleep(Duration::from_secs(60));
            drop(stream);
        }
    });
    addr
}

#[test]
fn fewer_than_three_arguments_is_a_usage_error() {
    for args in [
        &[][..],
        &["GET"][..],
        &["GET", "https://example.com/"][..],
    ] {
        let output = run_bridge(args);
        assert_eq!(output.status.code(), Some(1), "args: {args:?}");
        let json = stdout_json(&output);
        assert_eq!(
            json["error"],
            "Usage: fetch-cli <method> <url> <headers_json> [body]"
        );
    }
}

#[test]
fn malformed_headers_json_is_an_error_not_a_response() {
    let output = run_bridge(&["GET", "http://127.0.0.1:1/", "not-json"]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert!(json.get("error").is_some());
    assert!(json.get("status").is_none());
}

#[test]
fn successful_get_prints_the_response_object_and_exits_zero() {
    let addr = spawn_one_shot_server(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 13\r\nConnection: close\r\n\r\n<html></html>",
    );

    let url = format!("http://{addr}/");
    let output = run_bridge(&["GET", &url, "{}"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    assert!(
        stdout.starts_with("{\"status\":"),
        "status must be the first key, got: {stdout}"
    );

    let json = stdout_json(&output);
    assert_eq!(json["status"], 200);
    assert_eq!(json["statusText"], "OK");
    assert_eq!(json["headers"]["content-type"], "text/html");
    assert_eq!(json["body"], "<html></html>");
}

#[test]
fn unreachable_origin_reports_the_error_and_exits_one() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/");
    let output = run_bridge(&["GET", &url, "{}"]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[test]
fn pretty_flag_emits_indented_json() {
    let addr = spawn_one_shot_server(
        "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
    );

    let url = format!("http://{addr}/");
    let output = bridge()
        .args(["--pretty", "GET", url.as_str(), "{}"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().count() > 1);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["status"], 200);
    assert_eq!(json["body"], "ok");
}

#[test]
fn timeout_flag_bounds_a_stalled_request() {
    let addr = spawn_stalled_server();
    let url = format!("http://{addr}/");

    let started = Instant::now();
    let output = bridge()
        .args(["--timeout", "300", "GET", url.as_str(), "{}"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "the 300 ms timeout should fire well before the 30 s default"
    );
    let json = stdout_json(&output);
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[test]
fn timeout_env_var_is_honored() {
    let addr = spawn_stalled_server();
    let url = format!("http://{addr}/");

    let started = Instant::now();
    let output = bridge()
        .env("FETCH_CLI_TIMEOUT", "300")
        .args(["GET", url.as_str(), "{}"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "the env var timeout should fire well before the 30 s default"
    );
    let json = stdout_json(&output);
    assert!(!json["error"].as_str().unwrap().is_empty());
}

#[test]
fn impersonate_flag_selects_another_profile() {
    let addr = spawn_one_shot_server(
        "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
    );

    let url = format!("http://{addr}/");
    let output = bridge()
        .args(["--impersonate", "firefox", "GET", url.as_str(), "{}"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let json = stdout_json(&output);
    assert_eq!(json["status"], 200);
    assert_eq!(json["body"], "ok");
}

#[test]
fn impersonate_env_var_rejects_unknown_profiles() {
    let output = bridge()
        .env("FETCH_CLI_IMPERSONATE", "netscape")
        .args(["GET", "http://127.0.0.1:1/", "{}"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(
        json["error"],
        "Usage: fetch-cli <method> <url> <headers_json> [body]"
    );
}

#[test]
fn surplus_positional_arguments_are_a_usage_error() {
    let output = run_bridge(&["GET", "http://127.0.0.1:1/", "{}", "body", "extra"]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(
        json["error"],
        "Usage: fetch-cli <method> <url> <headers_json> [body]"
    );
}
