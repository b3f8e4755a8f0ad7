//! Two-phase command-line parsing.
//!
//! Phase one selects the lookup module from the first argument so that the
//! module can register its own flags. Phase two parses every remaining
//! argument against the combined command in a single pass.

use clap::ArgMatches;

use crate::config::{base_command, GlobalFlags};
use crate::error_handling::ConfigError;
use crate::modules::{LookupModule, ModuleRegistry};

/// The selected module plus the parsed flags.
pub struct Invocation {
    /// Fresh instance of the selected module
    pub module: Box<dyn LookupModule>,
    /// Global flag values, not yet validated
    pub flags: GlobalFlags,
    /// Full parse, including module-specific flags
    pub matches: ArgMatches,
}

/// Parses `args` (program name first) into an invocation.
///
/// # Errors
///
/// Returns `ConfigError::MissingModule` or `ConfigError::UnknownModule` when
/// no registered module is named, and `ConfigError::Flags` for flag syntax
/// errors and help requests.
pub fn parse_invocation(
    registry: &ModuleRegistry,
    args: &[String],
) -> Result<Invocation, ConfigError> {
    let program = args.first().map_or("dns_batch", String::as_str);

    let module_name = match args.get(1) {
        Some(name) if !name.starts_with('-') => name,
        // `--help` and friends still get clap's answer before the module check
        Some(_) => {
            base_command().try_get_matches_from(args)?;
            return Err(ConfigError::MissingModule {
                valid: registry.names(),
            });
        }
        None => {
            return Err(ConfigError::MissingModule {
                valid: registry.names(),
            })
        }
    };

    let module = registry.lookup(module_name)?;

    let command = base_command().about(format!("{}: {}", module.name(), module.description()));
    let matches = module
        .register_flags(command)
        .try_get_matches_from(std::iter::once(program).chain(args[2..].iter().map(String::as_str)))?;
    let flags = GlobalFlags::from_matches(&matches)?;

    Ok(Invocation {
        module,
        flags,
        matches,
    })
}
