//! Configuration constants.
//!
//! This module defines the defaults for every command-line flag, the sentinel
//! values used for standard input/output, and the built-in root server set.

/// Input/output path meaning "standard input" or "standard output".
pub const STDIO_SENTINEL: &str = "-";

/// Prefix marking a `--name-servers` value as a path to a file of servers.
pub const NAME_SERVER_FILE_PREFIX: char = '@';

/// Port appended to any name server given without one.
pub const DEFAULT_DNS_PORT: u16 = 53;

/// OS resolver configuration consulted when no name servers are given.
pub const DEFAULT_RESOLV_CONF: &str = "/etc/resolv.conf";

/// Only handler currently understood for input and output.
pub const DEFAULT_HANDLER: &str = "file";

// Flag defaults
pub const DEFAULT_THREADS: usize = 1000;
pub const DEFAULT_GO_PROCESSES: i64 = 0;
pub const DEFAULT_RESULT_VERBOSITY: &str = "normal";
pub const DEFAULT_LOG_VERBOSITY: i64 = 3;
pub const DEFAULT_RETRIES: usize = 1;
pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_CACHE_SIZE: usize = 10_000;
/// Per-name timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Per-iteration timeout in seconds (iterative mode only)
pub const DEFAULT_ITERATION_TIMEOUT_SECS: u64 = 4;
pub const DEFAULT_CLASS: &str = "INET";

/// The 13 IPv4 root name servers (a through m), used verbatim in iterative mode.
pub const ROOT_SERVERS: [&str; 13] = [
    "198.41.0.4:53",
    "199.9.14.201:53",
    "192.33.4.12:53",
    "199.7.91.13:53",
    "192.203.230.10:53",
    "192.5.5.241:53",
    "192.112.36.4:53",
    "198.97.190.53:53",
    "192.36.148.17:53",
    "192.58.128.30:53",
    "193.0.14.129:53",
    "199.7.83.42:53",
    "202.12.27.33:53",
];
