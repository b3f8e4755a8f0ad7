//! Run configuration.
//!
//! This module provides:
//! - Flag defaults and the built-in root server set
//! - Command-line flag definitions shared by every lookup module
//! - Typed configuration values and the `RunConfiguration` they form
//! - Scalar normalization, output group composition, and cross-field checks

mod checks;
mod constants;
mod flags;
mod normalize;
mod output;
mod types;

// Re-export all constants
pub use constants::*;
pub use checks::{check_stdin_allowed, parallelism_hint, resolve_passed_name, transport_mode};
pub use flags::{base_command, GlobalFlags};
pub use normalize::{parse_class, parse_log_verbosity, time_format, timeout_from_secs};
pub use output::compose_output_groups;
pub use types::{
    DnsClass, LogFormat, LogVerbosity, ResultVerbosity, RunConfiguration, TimeFormat,
    TransportMode,
};
