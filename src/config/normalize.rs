//! Scalar normalization.
//!
//! Table-driven conversions from raw flag values to typed configuration
//! values. Each conversion is total over its declared domain and returns
//! `ConfigError::InvalidValue` for anything else.

use std::str::FromStr;
use std::time::Duration;

use crate::config::types::{DnsClass, LogVerbosity, TimeFormat};
use crate::error_handling::ConfigError;

const CLASS_OPTIONS: &str = "valid values are INET (default), CSNET, CHAOS, HESIOD, NONE, ANY";
const VERBOSITY_OPTIONS: &str = "must be between 1 (lowest) and 5 (highest)";

/// Maps a class name (`INET`, `in`, `CH`, ...) to its typed class.
pub fn parse_class(raw: &str) -> Result<DnsClass, ConfigError> {
    DnsClass::from_str(raw).map_err(|_| ConfigError::InvalidValue {
        flag: "class",
        value: raw.to_string(),
        expected: CLASS_OPTIONS,
    })
}

/// Maps `--verbosity` (1..=5) onto the log severity scale.
pub fn parse_log_verbosity(level: i64) -> Result<LogVerbosity, ConfigError> {
    match level {
        1 => Ok(LogVerbosity::Fatal),
        2 => Ok(LogVerbosity::Error),
        3 => Ok(LogVerbosity::Warn),
        4 => Ok(LogVerbosity::Info),
        5 => Ok(LogVerbosity::Debug),
        _ => Err(ConfigError::InvalidValue {
            flag: "verbosity",
            value: level.to_string(),
            expected: VERBOSITY_OPTIONS,
        }),
    }
}

/// Selects the timestamp rendering from `--nanoseconds`.
pub fn time_format(nanoseconds: bool) -> TimeFormat {
    if nanoseconds {
        TimeFormat::Rfc3339Nano
    } else {
        TimeFormat::Rfc3339
    }
}

/// Converts whole seconds into a timeout.
///
/// Extreme values are left to the engine to interpret.
pub fn timeout_from_secs(secs: u64) -> Duration {
    Duration::from_secs(secs)
}
