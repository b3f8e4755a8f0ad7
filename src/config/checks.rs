//! Cross-field consistency checks.
//!
//! Rules that involve more than one flag, or a flag and the environment the
//! process was started in.

use std::num::NonZeroUsize;

use crate::config::constants::STDIO_SENTINEL;
use crate::config::types::TransportMode;
use crate::error_handling::ConfigError;
use crate::modules::LookupModule;

/// Combines `--tcp-only` and `--udp-only` into a single transport mode.
pub fn transport_mode(tcp_only: bool, udp_only: bool) -> Result<TransportMode, ConfigError> {
    match (tcp_only, udp_only) {
        (true, true) => Err(ConfigError::ConflictingFlags {
            first: "tcp-only",
            second: "udp-only",
        }),
        (true, false) => Ok(TransportMode::TcpOnly),
        (false, true) => Ok(TransportMode::UdpOnly),
        (false, false) => Ok(TransportMode::Any),
    }
}

/// Validates `--go-processes`.
///
/// Zero leaves the runtime default in place (`None`).
pub fn parallelism_hint(go_processes: i64) -> Result<Option<NonZeroUsize>, ConfigError> {
    if go_processes < 0 {
        return Err(ConfigError::InvalidValue {
            flag: "go-processes",
            value: go_processes.to_string(),
            expected: "must be 0 (runtime default) or a positive worker count",
        });
    }
    let count = usize::try_from(go_processes).map_err(|_| ConfigError::InvalidValue {
        flag: "go-processes",
        value: go_processes.to_string(),
        expected: "worker count does not fit this platform",
    })?;
    Ok(NonZeroUsize::new(count))
}

/// Rejects stdin input for modules that need multiple passes over their input.
pub fn check_stdin_allowed(module: &dyn LookupModule, input_file: &str) -> Result<(), ConfigError> {
    if input_file == STDIO_SENTINEL && !module.allow_stdin() {
        return Err(ConfigError::StdinNotAllowed {
            module: module.name().to_string(),
        });
    }
    Ok(())
}

/// Decides what to do with positional arguments left over after flag parsing.
///
/// A single leftover becomes an ad-hoc query name when stdin is an
/// interactive terminal and no `--input-file` was given (dig-like use).
/// Any other leftovers are an error.
pub fn resolve_passed_name(
    leftover: &[String],
    stdin_is_terminal: bool,
    input_file: &str,
) -> Result<Option<String>, ConfigError> {
    match leftover {
        [] => Ok(None),
        [name] if stdin_is_terminal && input_file == STDIO_SENTINEL => Ok(Some(name.clone())),
        _ => Err(ConfigError::UnusedArguments(leftover.to_vec())),
    }
}
