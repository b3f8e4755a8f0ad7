// Name server selection tests.

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn unused_conf() -> &'static Path {
    // Any read of this path would fail, proving the OS config was not consulted
    Path::new("/nonexistent/resolv.conf")
}

#[test]
fn test_inline_list_adds_missing_ports_only() {
    let ns = resolve_name_servers(Some("10.0.0.1,10.0.0.2:5353"), false, unused_conf()).unwrap();
    assert_eq!(ns.servers, vec!["10.0.0.1:53", "10.0.0.2:5353"]);
    assert_eq!(ns.source, NameServerSource::ExplicitList);
    assert!(ns.specified());
}

#[test]
fn test_inline_list_trims_whitespace_before_adding_port() {
    let ns = resolve_name_servers(Some("8.8.8.8, 1.1.1.1 "), false, unused_conf()).unwrap();
    assert_eq!(ns.servers, vec!["8.8.8.8:53", "1.1.1.1:53"]);
}

#[test]
fn test_inline_list_entries_with_port_kept_verbatim() {
    // No validation beyond port repair: malformed entries pass through
    let ns = resolve_name_servers(Some(" 9.9.9.9:53 ,not a server"), false, unused_conf()).unwrap();
    assert_eq!(ns.servers, vec![" 9.9.9.9:53 ", "not a server:53"]);
}

#[test]
fn test_explicit_list_wins_over_iterative_default() {
    let ns = resolve_name_servers(Some("10.0.0.1"), true, unused_conf()).unwrap();
    assert_eq!(ns.servers, vec!["10.0.0.1:53"]);
    assert!(ns.specified());
}

#[test]
fn test_file_designation_strips_trailing_blank_line() {
    let file = temp_file_with("a.b.c\nd.e.f\n");
    let designation = format!("@{}", file.path().display());

    let ns = resolve_name_servers(Some(&designation), false, unused_conf()).unwrap();
    assert_eq!(ns.servers, vec!["a.b.c:53", "d.e.f:53"]);
    assert_eq!(ns.source, NameServerSource::ExplicitFile);
    assert!(ns.specified());
}

#[test]
fn test_file_designation_keeps_explicit_ports() {
    let file = temp_file_with("\n192.0.2.1:5300\n192.0.2.2\n\n");
    let designation = format!("@{}", file.path().display());

    let ns = resolve_name_servers(Some(&designation), false, unused_conf()).unwrap();
    assert_eq!(ns.servers, vec!["192.0.2.1:5300", "192.0.2.2:53"]);
}

#[test]
fn test_empty_file_designation_is_fatal() {
    let file = temp_file_with("");
    let designation = format!("@{}", file.path().display());

    let err = resolve_name_servers(Some(&designation), false, unused_conf()).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyResource { .. }));
    assert_eq!(err.flag(), Some("name-servers"));
}

#[test]
fn test_missing_file_designation_is_fatal() {
    let err = resolve_name_servers(Some("@/nonexistent/servers.txt"), false, unused_conf())
        .unwrap_err();
    assert!(matches!(err, ConfigError::ResourceAccess { .. }));
    assert!(err.to_string().contains("/nonexistent/servers.txt"));
}

#[test]
fn test_iterative_without_designation_uses_root_servers() {
    let ns = resolve_name_servers(None, true, unused_conf()).unwrap();
    assert_eq!(ns.source, NameServerSource::RootServers);
    assert!(!ns.specified());
    assert_eq!(ns.servers.len(), 13);
    assert_eq!(ns.servers, ROOT_SERVERS.to_vec());
}

#[test]
fn test_recursive_without_designation_reads_os_config() {
    let conf = temp_file_with(
        "# generated\nsearch example.internal\nnameserver 192.0.2.53\nnameserver 2001:db8::53\noptions ndots:2\n",
    );

    let ns = resolve_name_servers(None, false, conf.path()).unwrap();
    assert_eq!(ns.source, NameServerSource::OsConfig);
    assert!(!ns.specified());
    assert_eq!(ns.servers, vec!["192.0.2.53:53", "[2001:db8::53]:53"]);
}

#[test]
fn test_unreadable_os_config_is_fatal() {
    let err = resolve_name_servers(None, false, unused_conf()).unwrap_err();
    assert!(matches!(err, ConfigError::ResourceAccess { .. }));
    assert_eq!(err.flag(), Some("conf-file"));
}

#[test]
fn test_os_config_without_nameservers_is_fatal() {
    let conf = temp_file_with("search example.internal\n");
    let err = resolve_name_servers(None, false, conf.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ResolverConfig { .. }));
}

#[test]
fn test_every_entry_has_a_port() {
    let ns = resolve_name_servers(Some("a,b:1,c"), false, unused_conf()).unwrap();
    assert!(ns.servers.iter().all(|s| s.contains(':')));
}
