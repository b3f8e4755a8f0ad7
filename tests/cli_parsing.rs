//! Tests for command-line parsing and configuration resolution with the
//! built-in modules.

mod helpers;

use std::time::Duration;

use dns_batch::config::{DnsClass, LogVerbosity, ResultVerbosity, TimeFormat, TransportMode};
use dns_batch::{parse_invocation, resolve_configuration, ConfigError, ModuleRegistry};
use helpers::{args, write_file, PIPED, TERMINAL};

fn resolve(list: &[&str]) -> Result<dns_batch::RunConfiguration, ConfigError> {
    let invocation = parse_invocation(ModuleRegistry::global(), &args(list))?;
    resolve_configuration(&invocation, &PIPED)
}

#[test]
fn test_defaults_with_explicit_servers() {
    let config = resolve(&["a", "--name-servers", "8.8.8.8"]).unwrap();

    assert_eq!(config.module, "A");
    assert_eq!(config.threads, 1000);
    assert_eq!(config.parallelism, None);
    assert_eq!(config.class, DnsClass::Inet);
    assert_eq!(config.class.code(), 1);
    assert_eq!(config.transport, TransportMode::Any);
    assert_eq!(config.log_verbosity, LogVerbosity::Warn);
    assert_eq!(config.result_verbosity, ResultVerbosity::Normal);
    assert_eq!(config.output_groups, vec!["normal".to_string(), String::new()]);
    assert_eq!(config.timeout, Duration::from_secs(15));
    assert_eq!(config.iteration_timeout, Duration::from_secs(4));
    assert_eq!(config.time_format, TimeFormat::Rfc3339);
    assert_eq!(config.name_servers.servers, vec!["8.8.8.8:53"]);
    assert!(config.name_servers.specified());
    assert_eq!(config.passed_name, None);
}

#[test]
fn test_scalar_flags_are_normalized() {
    let config = resolve(&[
        "MX",
        "--name-servers",
        "8.8.8.8",
        "--class",
        "ch",
        "--timeout",
        "3",
        "--iteration-timeout",
        "1",
        "--nanoseconds",
        "--verbosity",
        "5",
        "--go-processes",
        "2",
        "--tcp-only",
    ])
    .unwrap();

    assert_eq!(config.class, DnsClass::Chaos);
    assert_eq!(config.timeout, Duration::from_secs(3));
    assert_eq!(config.iteration_timeout, Duration::from_secs(1));
    assert_eq!(config.time_format, TimeFormat::Rfc3339Nano);
    assert_eq!(config.log_verbosity, LogVerbosity::Debug);
    assert_eq!(config.parallelism.map(|n| n.get()), Some(2));
    assert_eq!(config.transport, TransportMode::TcpOnly);
}

#[test]
fn test_iterative_default_uses_root_servers() {
    let config = resolve(&["NS", "--iterative"]).unwrap();
    assert_eq!(config.name_servers.servers.len(), 13);
    assert_eq!(config.name_servers.servers[0], "198.41.0.4:53");
    assert!(!config.name_servers.specified());
}

#[test]
fn test_non_iterative_default_reads_conf_file() {
    let dir = tempfile::tempdir().unwrap();
    let conf = write_file(dir.path(), "resolv.conf", "nameserver 192.0.2.10\n");

    let config = resolve(&["A", "--conf-file", conf.to_str().unwrap()]).unwrap();
    assert_eq!(config.name_servers.servers, vec!["192.0.2.10:53"]);
    assert!(!config.name_servers.specified());
}

#[test]
fn test_name_server_file() {
    let dir = tempfile::tempdir().unwrap();
    let servers = write_file(dir.path(), "servers.txt", "a.b.c\nd.e.f\n");
    let designation = format!("@{}", servers.display());

    let config = resolve(&["A", "--name-servers", &designation]).unwrap();
    assert_eq!(config.name_servers.servers, vec!["a.b.c:53", "d.e.f:53"]);
}

#[test]
fn test_module_flags_are_accepted_after_module_name() {
    let config = resolve(&[
        "mxlookup",
        "--name-servers",
        "8.8.8.8",
        "--ipv6-lookup",
        "--mx-cache-size",
        "50",
    ])
    .unwrap();
    assert_eq!(config.module, "MXLOOKUP");
}

#[test]
fn test_module_flags_belong_to_their_module() {
    let result = parse_invocation(
        ModuleRegistry::global(),
        &args(&["A", "--mx-cache-size", "50"]),
    );
    assert!(matches!(result, Err(ConfigError::Flags(_))));
}

#[test]
fn test_output_groups_compose_in_order() {
    let config = resolve(&[
        "A",
        "--name-servers",
        "8.8.8.8",
        "--result-verbosity",
        "trace",
        "--include-fields",
        "ttl,class",
    ])
    .unwrap();
    assert_eq!(config.output_groups, vec!["trace", "ttl", "class"]);
}

#[test]
fn test_single_leftover_with_terminal_is_a_name() {
    let invocation = parse_invocation(
        ModuleRegistry::global(),
        &args(&["A", "--name-servers", "8.8.8.8", "example.com"]),
    )
    .unwrap();
    let config = resolve_configuration(&invocation, &TERMINAL).unwrap();
    assert_eq!(config.passed_name.as_deref(), Some("example.com"));
    assert!(!config.reads_stdin());
}

#[test]
fn test_zero_leftovers_with_piped_stdin() {
    let config = resolve(&["A", "--name-servers", "8.8.8.8"]).unwrap();
    assert_eq!(config.passed_name, None);
    assert!(config.reads_stdin());
}
