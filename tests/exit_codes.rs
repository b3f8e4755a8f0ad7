//! Tests for the binary's exit codes and error output.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_binary(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dns_batch"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start dns_batch");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for dns_batch")
}

#[test]
fn test_missing_module_exits_one() {
    let output = run_binary(&[], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dns_batch error:"), "stderr: {stderr}");
}

#[test]
fn test_help_exits_zero() {
    let output = run_binary(&["--help"], "");
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--name-servers"), "stdout: {stdout}");
}

#[test]
fn test_flag_syntax_error_uses_clap_exit_code() {
    let output = run_binary(&["A", "--no-such-flag"], "");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_validation_error_exits_one() {
    let output = run_binary(
        &["A", "--name-servers", "192.0.2.1", "--tcp-only", "--udp-only"],
        "",
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("conflicting"), "stderr: {stderr}");
}

#[test]
fn test_module_initialize_failure_exits_one() {
    let output = run_binary(
        &["AXFR", "--name-servers", "192.0.2.1", "--udp-only"],
        "example.com\n",
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AXFR"), "stderr: {stderr}");
}
