//! Handoff to the module and the engine.

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::debug;

use crate::config::RunConfiguration;
use crate::engine::{LookupSummary, ResolutionEngine};
use crate::initialization::RuntimeContext;
use crate::modules::LookupModule;

/// Initializes `module`, runs the engine, and finalizes the module.
///
/// Stops at the first failing step; `finalize` only runs after successful
/// lookups.
///
/// # Errors
///
/// Returns the failing step's error with the module name attached.
pub fn hand_off(
    module: &mut dyn LookupModule,
    flags: &ArgMatches,
    config: &RunConfiguration,
    engine: &dyn ResolutionEngine,
    runtime: &RuntimeContext,
) -> Result<LookupSummary> {
    let name = module.name().to_string();

    module
        .initialize(config, flags)
        .with_context(|| format!("Failed to initialize module {name}"))?;
    debug!("Module {} initialized", name);

    let summary = engine
        .do_lookups(&*module, config, runtime)
        .with_context(|| format!("Lookups failed for module {name}"))?;

    module
        .finalize()
        .with_context(|| format!("Failed to finalize module {name}"))?;
    debug!("Module {} finalized", name);

    Ok(summary)
}
