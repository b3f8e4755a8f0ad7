//! Configuration types.
//!
//! This module defines the typed values produced by the configuration pipeline
//! and the `RunConfiguration` handed to lookup modules and the engine.

use std::num::NonZeroUsize;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use clap::ValueEnum;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::nameservers::NameServers;

/// DNS class queried for every name.
///
/// Parsing is case-insensitive and accepts both the full name and the
/// two-letter mnemonic where one exists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsClass {
    /// Internet (1)
    #[strum(to_string = "INET", serialize = "IN")]
    Inet,
    /// CSNET (2)
    #[strum(to_string = "CSNET", serialize = "CS")]
    Csnet,
    /// CHAOS (3)
    #[strum(to_string = "CHAOS", serialize = "CH")]
    Chaos,
    /// Hesiod (4)
    #[strum(to_string = "HESIOD", serialize = "HS")]
    Hesiod,
    /// QCLASS NONE (254)
    #[strum(to_string = "NONE")]
    None,
    /// QCLASS ANY (255)
    #[strum(to_string = "ANY")]
    Any,
}

impl DnsClass {
    /// Numeric class code as carried on the wire.
    pub fn code(self) -> u16 {
        match self {
            DnsClass::Inet => 1,
            DnsClass::Csnet => 2,
            DnsClass::Chaos => 3,
            DnsClass::Hesiod => 4,
            DnsClass::None => 254,
            DnsClass::Any => 255,
        }
    }
}

/// Transport restriction for outgoing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// UDP with TCP fallback (default)
    #[default]
    Any,
    /// Only perform lookups over TCP
    TcpOnly,
    /// Only perform lookups over UDP
    UdpOnly,
}

/// Log verbosity, from quietest to loudest.
///
/// Selected with `--verbosity 1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogVerbosity {
    /// Only fatal diagnostics (reported by the binary, not the logger)
    Fatal,
    /// Error messages
    Error,
    /// Error and warning messages (default)
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// Everything, including debugging output
    Debug,
}

impl From<LogVerbosity> for log::LevelFilter {
    fn from(v: LogVerbosity) -> Self {
        match v {
            LogVerbosity::Fatal => log::LevelFilter::Off,
            LogVerbosity::Error => log::LevelFilter::Error,
            LogVerbosity::Warn => log::LevelFilter::Warn,
            LogVerbosity::Info => log::LevelFilter::Info,
            LogVerbosity::Debug => log::LevelFilter::Debug,
        }
    }
}

/// Detail preset for each output record; always the first output group.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResultVerbosity {
    /// Name and status only
    Short,
    /// Default record layout
    Normal,
    /// Adds class and resolver
    Long,
    /// Everything, including per-query limits
    Trace,
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Timestamp rendering used in output records and metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeFormat {
    /// RFC 3339 with whole seconds
    Rfc3339,
    /// RFC 3339 with nanosecond precision
    Rfc3339Nano,
}

impl TimeFormat {
    /// Renders `ts` in this format (always UTC, `Z` suffix).
    pub fn format(self, ts: DateTime<Utc>) -> String {
        let precision = match self {
            TimeFormat::Rfc3339 => SecondsFormat::Secs,
            TimeFormat::Rfc3339Nano => SecondsFormat::Nanos,
        };
        ts.to_rfc3339_opts(precision, true)
    }
}

/// Fully validated configuration for one run.
///
/// Produced once by the configuration pipeline and only ever shared by
/// reference afterwards: lookup modules and the engine read it, nothing
/// writes to it.
#[derive(Debug, Clone, Serialize)]
pub struct RunConfiguration {
    /// Upper-cased name of the selected lookup module
    pub module: String,

    /// Number of concurrent lookup tasks
    pub threads: usize,

    /// Worker threads for the async runtime (`None` keeps the runtime default)
    pub parallelism: Option<NonZeroUsize>,

    /// Prepended to every input name (e.g. `www.`)
    pub name_prefix: String,

    /// Input lines are `rank,domain` pairs from an Alexa top-sites list
    pub alexa_format: bool,

    /// Walk the delegation hierarchy instead of asking a recursive resolver
    pub iterative: bool,

    /// Names to read (`-` for stdin)
    pub input_file: String,

    /// Where output records go (`-` for stdout)
    pub output_file: String,

    /// Where run metadata goes, if anywhere
    pub metadata_file: Option<String>,

    /// Where logs go, if not stderr
    pub log_file: Option<String>,

    /// Handler used to read names
    pub input_handler: String,

    /// Handler used to write records
    pub output_handler: String,

    /// Timeout for resolving an individual name
    pub timeout: Duration,

    /// Timeout for a single iteration of an iterative lookup
    pub iteration_timeout: Duration,

    /// Retries on timeout or temporary failure
    pub retries: usize,

    /// Maximum delegation depth for iterative lookups
    pub max_depth: usize,

    /// Capacity of the resolver cache
    pub cache_size: usize,

    /// DNS class to query
    pub class: DnsClass,

    /// Transport restriction
    pub transport: TransportMode,

    /// Log verbosity
    pub log_verbosity: LogVerbosity,

    /// Log output format
    pub log_format: LogFormat,

    /// Base output detail preset
    pub result_verbosity: ResultVerbosity,

    /// Output groups: the result verbosity followed by `--include-fields`
    pub output_groups: Vec<String>,

    /// Upstream name servers and where they came from
    pub name_servers: NameServers,

    /// Timestamp rendering
    pub time_format: TimeFormat,

    /// Single name passed on the command line instead of an input file
    pub passed_name: Option<String>,
}

impl RunConfiguration {
    /// Returns true when names are read from standard input.
    pub fn reads_stdin(&self) -> bool {
        self.passed_name.is_none() && self.input_file == crate::config::STDIO_SENTINEL
    }

    /// Returns true when `group` appears in the output groups.
    pub fn includes_group(&self, group: &str) -> bool {
        self.output_groups.iter().any(|g| g == group)
    }
}

#[cfg(test)]
impl RunConfiguration {
    /// Configuration equal to the flag defaults, with one explicit name server.
    pub(crate) fn for_tests() -> Self {
        use crate::config::constants::*;
        use crate::nameservers::NameServerSource;

        Self {
            module: "A".to_string(),
            threads: DEFAULT_THREADS,
            parallelism: None,
            name_prefix: String::new(),
            alexa_format: false,
            iterative: false,
            input_file: STDIO_SENTINEL.to_string(),
            output_file: STDIO_SENTINEL.to_string(),
            metadata_file: None,
            log_file: None,
            input_handler: DEFAULT_HANDLER.to_string(),
            output_handler: DEFAULT_HANDLER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            iteration_timeout: Duration::from_secs(DEFAULT_ITERATION_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            max_depth: DEFAULT_MAX_DEPTH,
            cache_size: DEFAULT_CACHE_SIZE,
            class: DnsClass::Inet,
            transport: TransportMode::Any,
            log_verbosity: LogVerbosity::Warn,
            log_format: LogFormat::Plain,
            result_verbosity: ResultVerbosity::Normal,
            output_groups: vec!["normal".to_string(), String::new()],
            name_servers: NameServers {
                servers: vec!["192.0.2.1:53".to_string()],
                source: NameServerSource::ExplicitList,
            },
            time_format: TimeFormat::Rfc3339,
            passed_name: None,
        }
    }
}
