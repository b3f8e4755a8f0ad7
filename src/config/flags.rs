//! Command-line flags shared by every lookup module.
//!
//! Flags are defined with `clap`'s derive API and attached to a builder
//! `Command` so that the selected lookup module can add its own arguments
//! before the single combined parse.

use std::path::PathBuf;

use clap::{Args, Command, FromArgMatches};

use crate::config::constants::*;
use crate::config::types::LogFormat;

/// Raw flag values, before normalization and validation.
#[derive(Debug, Clone, Args)]
pub struct GlobalFlags {
    /// Number of lightweight lookup tasks
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Number of runtime worker threads (0 keeps the runtime default)
    #[arg(long, default_value_t = DEFAULT_GO_PROCESSES, allow_negative_numbers = true)]
    pub go_processes: i64,

    /// Name to be prepended to what's passed in (e.g., www.)
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Input file is an Alexa Top Million download (rank,domain)
    #[arg(long)]
    pub alexa: bool,

    /// Perform own iteration instead of relying on a recursive resolver
    #[arg(long)]
    pub iterative: bool,

    /// Names to read (- for stdin)
    #[arg(long, default_value = STDIO_SENTINEL)]
    pub input_file: String,

    /// Where JSON output should be saved (- for stdout)
    #[arg(long, default_value = STDIO_SENTINEL)]
    pub output_file: String,

    /// Where JSON metadata should be saved
    #[arg(long)]
    pub metadata_file: Option<String>,

    /// Where logs should be saved
    #[arg(long)]
    pub log_file: Option<String>,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Verbosity of each output record. Options: short, normal, long, trace
    #[arg(long, default_value = DEFAULT_RESULT_VERBOSITY)]
    pub result_verbosity: String,

    /// Comma separated list of fields to output beyond result verbosity.
    /// Options: class, protocol, ttl, resolver, flags
    #[arg(long, default_value = "")]
    pub include_fields: String,

    /// Log verbosity: 1 (lowest)--5 (highest)
    #[arg(long, default_value_t = DEFAULT_LOG_VERBOSITY, allow_negative_numbers = true)]
    pub verbosity: i64,

    /// How many times to retry a query on timeout or temporary failure
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: usize,

    /// How deep to recurse when performing iterative lookups
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// How many items can be stored in the internal recursive cache
    #[arg(long, default_value_t = DEFAULT_CACHE_SIZE)]
    pub cache_size: usize,

    /// Handler to input names
    #[arg(long, default_value = DEFAULT_HANDLER)]
    pub input_handler: String,

    /// Handler to output results
    #[arg(long, default_value = DEFAULT_HANDLER)]
    pub output_handler: String,

    /// Only perform lookups over TCP
    #[arg(long)]
    pub tcp_only: bool,

    /// Only perform lookups over UDP
    #[arg(long)]
    pub udp_only: bool,

    /// DNS servers to use, comma-delimited or @/path/to/file. Port defaults to 53
    #[arg(long)]
    pub name_servers: Option<String>,

    /// Resolver config file consulted when no name servers are given
    #[arg(long, default_value = DEFAULT_RESOLV_CONF)]
    pub conf_file: PathBuf,

    /// Timeout in seconds for resolving an individual name
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Timeout in seconds for a single iteration of an iterative query
    #[arg(long, default_value_t = DEFAULT_ITERATION_TIMEOUT_SECS)]
    pub iteration_timeout: u64,

    /// DNS class to query. Options: INET, CSNET, CHAOS, HESIOD, NONE, ANY
    #[arg(long, default_value = DEFAULT_CLASS)]
    pub class: String,

    /// Use nanosecond resolution timestamps
    #[arg(long)]
    pub nanoseconds: bool,

    /// Single name to look up (only with an interactive terminal and no --input-file)
    #[arg(value_name = "NAME")]
    pub leftover: Vec<String>,
}

impl GlobalFlags {
    /// Extracts the global flags from a combined parse.
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Self, clap::Error> {
        <Self as FromArgMatches>::from_arg_matches(matches)
    }

    /// `--name-servers`, treating an empty value as unset.
    pub fn name_server_designation(&self) -> Option<&str> {
        self.name_servers.as_deref().filter(|s| !s.is_empty())
    }
}

/// Builds the base command holding only the global flags.
///
/// Lookup modules extend the returned command with their own arguments.
pub fn base_command() -> Command {
    let cmd = Command::new("dns_batch")
        .about("Batch DNS lookups driven by a pluggable lookup module")
        .override_usage("dns_batch <MODULE> [OPTIONS] [NAME]");
    GlobalFlags::augment_args(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> GlobalFlags {
        let matches = base_command()
            .try_get_matches_from(args)
            .expect("Should parse flags");
        GlobalFlags::from_matches(&matches).expect("Should extract flags")
    }

    #[test]
    fn test_defaults() {
        let flags = parse(&["dns_batch"]);
        assert_eq!(flags.threads, 1000);
        assert_eq!(flags.go_processes, 0);
        assert_eq!(flags.input_file, "-");
        assert_eq!(flags.output_file, "-");
        assert_eq!(flags.result_verbosity, "normal");
        assert_eq!(flags.include_fields, "");
        assert_eq!(flags.verbosity, 3);
        assert_eq!(flags.retries, 1);
        assert_eq!(flags.max_depth, 10);
        assert_eq!(flags.cache_size, 10_000);
        assert_eq!(flags.input_handler, "file");
        assert_eq!(flags.output_handler, "file");
        assert_eq!(flags.conf_file, PathBuf::from("/etc/resolv.conf"));
        assert_eq!(flags.timeout, 15);
        assert_eq!(flags.iteration_timeout, 4);
        assert_eq!(flags.class, "INET");
        assert_eq!(flags.log_format, LogFormat::Plain);
        assert!(!flags.tcp_only && !flags.udp_only && !flags.nanoseconds);
        assert!(flags.name_servers.is_none());
        assert!(flags.leftover.is_empty());
    }

    #[test]
    fn test_negative_numbers_reach_validation() {
        // Negative values must parse so the pipeline can report them itself
        let flags = parse(&["dns_batch", "--go-processes", "-2", "--verbosity", "-1"]);
        assert_eq!(flags.go_processes, -2);
        assert_eq!(flags.verbosity, -1);
    }

    #[test]
    fn test_log_format_selects_json() {
        let flags = parse(&["dns_batch", "--log-format", "json"]);
        assert_eq!(flags.log_format, LogFormat::Json);
    }

    #[test]
    fn test_leftover_positionals_are_collected() {
        let flags = parse(&["dns_batch", "--iterative", "example.com", "example.org"]);
        assert!(flags.iterative);
        assert_eq!(flags.leftover, vec!["example.com", "example.org"]);
    }

    #[test]
    fn test_empty_name_servers_is_unset() {
        let flags = parse(&["dns_batch", "--name-servers", ""]);
        assert_eq!(flags.name_server_designation(), None);

        let flags = parse(&["dns_batch", "--name-servers", "1.1.1.1"]);
        assert_eq!(flags.name_server_designation(), Some("1.1.1.1"));
    }

    #[test]
    fn test_negative_timeout_is_rejected_by_parser() {
        let result = base_command().try_get_matches_from(["dns_batch", "--timeout=-1"]);
        assert!(result.is_err());
    }
}
