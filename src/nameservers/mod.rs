//! Name server selection.
//!
//! Decides which upstream servers the run uses. Exactly one source is
//! consulted, in this order of precedence:
//! - An explicit `--name-servers` designation: either a comma-separated list
//!   or `@path` naming a file with one server per line
//! - The built-in root server set, in iterative mode
//! - The OS resolver configuration (`--conf-file`), otherwise
//!
//! Sources are never merged. Every resulting entry carries an explicit port.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::config::{DEFAULT_DNS_PORT, NAME_SERVER_FILE_PREFIX, ROOT_SERVERS};
use crate::error_handling::ConfigError;

/// Where the name server list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameServerSource {
    /// Comma-separated `--name-servers` value
    ExplicitList,
    /// `--name-servers @path`
    ExplicitFile,
    /// Nameserver lines of the OS resolver configuration
    OsConfig,
    /// Built-in root servers (iterative mode)
    RootServers,
}

impl NameServerSource {
    /// True when the user designated the servers.
    pub fn is_explicit(self) -> bool {
        matches!(
            self,
            NameServerSource::ExplicitList | NameServerSource::ExplicitFile
        )
    }
}

/// Ordered `host:port` name servers and their provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameServers {
    /// Servers in selection order
    pub servers: Vec<String>,
    /// Where `servers` came from
    pub source: NameServerSource,
}

impl NameServers {
    /// True when the user designated the servers (as opposed to a default).
    pub fn specified(&self) -> bool {
        self.source.is_explicit()
    }
}

/// Resolves the effective name server list.
///
/// `designation` is the `--name-servers` value, already filtered for
/// emptiness. `conf_file` is only read when there is no designation and the
/// run is not iterative.
///
/// # Errors
///
/// Returns an error if a designated file is unreadable or empty, or if the
/// OS resolver configuration cannot be read or lists no servers.
pub fn resolve_name_servers(
    designation: Option<&str>,
    iterative: bool,
    conf_file: &Path,
) -> Result<NameServers, ConfigError> {
    let resolved = match designation {
        None if iterative => NameServers {
            servers: ROOT_SERVERS.iter().map(|s| s.to_string()).collect(),
            source: NameServerSource::RootServers,
        },
        None => NameServers {
            servers: read_os_name_servers(conf_file)?,
            source: NameServerSource::OsConfig,
        },
        Some(value) => match value.strip_prefix(NAME_SERVER_FILE_PREFIX) {
            Some(path) => NameServers {
                servers: with_default_ports(read_name_server_file(Path::new(path))?),
                source: NameServerSource::ExplicitFile,
            },
            None => NameServers {
                servers: with_default_ports(value.split(',').map(str::to_string).collect()),
                source: NameServerSource::ExplicitList,
            },
        },
    };

    if !resolved.specified() {
        info!(
            "no name servers specified. will use: {}",
            resolved.servers.join(", ")
        );
    }

    Ok(resolved)
}

/// Reads a file of name servers, one per line.
///
/// Leading and trailing line breaks are dropped before splitting, so a
/// trailing newline does not produce an empty entry.
fn read_name_server_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ResourceAccess {
        what: "name server file",
        path: path.to_path_buf(),
        source,
    })?;
    if contents.is_empty() {
        return Err(ConfigError::EmptyResource {
            what: "name server file",
            path: path.to_path_buf(),
        });
    }
    Ok(contents
        .trim_matches('\n')
        .split('\n')
        .map(str::to_string)
        .collect())
}

/// Reads the `nameserver` entries of a resolv.conf-style file.
///
/// # Errors
///
/// Any read or parse failure, and a file without nameserver entries, is an
/// error: the run has nothing to query.
pub fn read_os_name_servers(conf_file: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = fs::read(conf_file).map_err(|source| ConfigError::ResourceAccess {
        what: "resolver config",
        path: conf_file.to_path_buf(),
        source,
    })?;
    let parsed = resolv_conf::Config::parse(&contents)
        .map_err(|e| resolver_config_error(conf_file, e.to_string()))?;

    let servers: Vec<String> = parsed
        .nameservers
        .into_iter()
        .map(|ns| {
            let ip: IpAddr = ns.into();
            SocketAddr::new(ip, DEFAULT_DNS_PORT).to_string()
        })
        .collect();

    if servers.is_empty() {
        return Err(resolver_config_error(
            conf_file,
            "no nameserver entries".to_string(),
        ));
    }
    Ok(servers)
}

fn resolver_config_error(path: &Path, reason: String) -> ConfigError {
    ConfigError::ResolverConfig {
        path: PathBuf::from(path),
        reason,
    }
}

/// Appends the default port to every entry without one.
///
/// Entries without a port separator are whitespace-trimmed first. Entries
/// that already name a port are kept verbatim; no other validation happens.
fn with_default_ports(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|entry| {
            if entry.contains(':') {
                entry
            } else {
                format!("{}:{}", entry.trim(), DEFAULT_DNS_PORT)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
