//! Run orchestration.
//!
//! Sequences a run from raw arguments to finished lookups:
//! 1. Select the module and parse flags (two phases)
//! 2. Initialize logging
//! 3. Resolve and validate the run configuration
//! 4. Build the runtime context
//! 5. Hand off to the module and the engine
//!
//! Every stage returns its error to the caller; only the binary exits.

mod handoff;
mod invocation;
mod resolve;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::config::{parse_log_verbosity, LogFormat, LogVerbosity, RunConfiguration};
use crate::engine::{LookupSummary, PlanEngine, ResolutionEngine};
use crate::error_handling::InitializationError;
use crate::initialization::{init_logger_with, RuntimeContext};
use crate::modules::ModuleRegistry;

pub use handoff::hand_off;
pub use invocation::{parse_invocation, Invocation};
pub use resolve::resolve_configuration;

/// Facts about the process environment the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    /// Whether standard input is an interactive terminal
    pub stdin_is_terminal: bool,
}

impl Environment {
    /// Inspects the current process.
    pub fn detect() -> Self {
        Self {
            stdin_is_terminal: std::io::stdin().is_terminal(),
        }
    }
}

/// Results of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Configuration the run used
    pub config: RunConfiguration,
    /// Counts reported by the engine
    pub summary: LookupSummary,
}

/// Runs the built-in modules with the plan engine.
///
/// `args` starts with the program name, as `std::env::args()` does.
///
/// # Errors
///
/// Returns configuration errors as `ConfigError` (downcastable from the
/// returned `anyhow::Error`), and module or engine failures with context.
pub fn run_cli(args: Vec<String>) -> Result<RunReport> {
    run_with(
        ModuleRegistry::global(),
        &PlanEngine::new(),
        &args,
        Environment::detect(),
    )
}

/// Runs with an explicit registry, engine, and environment.
///
/// # Errors
///
/// See [`run_cli`].
pub fn run_with(
    registry: &ModuleRegistry,
    engine: &dyn ResolutionEngine,
    args: &[String],
    env: Environment,
) -> Result<RunReport> {
    let mut invocation = parse_invocation(registry, args)?;

    let verbosity = parse_log_verbosity(invocation.flags.verbosity)?;
    init_logging(
        verbosity,
        invocation.flags.log_format,
        invocation.flags.log_file.as_deref().map(Path::new),
    )?;

    let config = resolve_configuration(&invocation, &env)?;

    let runtime =
        RuntimeContext::new(config.parallelism).context("Failed to initialize runtime")?;

    let summary = hand_off(
        invocation.module.as_mut(),
        &invocation.matches,
        &config,
        engine,
        &runtime,
    )?;

    Ok(RunReport { config, summary })
}

fn init_logging(
    verbosity: LogVerbosity,
    format: LogFormat,
    log_file: Option<&Path>,
) -> Result<()> {
    match init_logger_with(verbosity.into(), format, log_file) {
        Ok(()) => Ok(()),
        // A logger set earlier in this process (embedding, tests) keeps working
        Err(InitializationError::LoggerError(e)) => {
            debug!("Logger already initialized: {e}");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to initialize logger"),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
