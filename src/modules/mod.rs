//! Lookup modules and the module registry.
//!
//! A lookup module is a pluggable lookup strategy (address lookup, mail
//! exchanger lookup, zone transfer, ...) selected by name as the first
//! command-line argument. Each module exposes a small capability contract:
//! - `register_flags`: add module-specific arguments before the flag parse
//! - `initialize`: read those arguments and the run configuration
//! - `allow_stdin`: whether names may be streamed from standard input
//! - `allows_server`: whether a name server may be contacted at all
//! - `finalize`: release anything acquired during the run
//!
//! Modules are created from factories held in a process-wide registry keyed
//! by upper-case module name.

mod builtin;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use anyhow::Result;
use clap::{ArgMatches, Command};
use serde_json::{Map, Value};

use crate::config::RunConfiguration;
use crate::error_handling::ConfigError;

pub use builtin::{
    AddressLookup, MxLookup, NsLookup, RawLookup, RecordType, TxtRecordLookup, ZoneTransfer,
};

/// Capability contract every lookup module implements.
pub trait LookupModule: Send + Sync {
    /// Upper-case registry name.
    fn name(&self) -> &str;

    /// One-line description, shown in the module's `--help`.
    fn description(&self) -> &str;

    /// Adds module-specific arguments to the shared command.
    fn register_flags(&self, cmd: Command) -> Command {
        cmd
    }

    /// Reads module flags and prepares for lookups.
    fn initialize(&mut self, config: &RunConfiguration, flags: &ArgMatches) -> Result<()>;

    /// Whether names may be streamed from standard input.
    fn allow_stdin(&self) -> bool {
        true
    }

    /// Record types this module queries for every input name.
    fn query_types(&self) -> Vec<RecordType>;

    /// Name actually queried for an input name.
    fn query_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Prefix a TXT answer must start with to be kept, for policy lookups.
    fn policy_prefix(&self) -> Option<&str> {
        None
    }

    /// Whether `server` (`host:port`) may be contacted.
    fn allows_server(&self, _server: &str) -> bool {
        true
    }

    /// Module settings worth recording in the run metadata.
    fn options(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Releases resources after all lookups completed.
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Creates a fresh module instance.
pub type ModuleFactory = Box<dyn Fn() -> Box<dyn LookupModule> + Send + Sync>;

static REGISTRY: LazyLock<ModuleRegistry> = LazyLock::new(ModuleRegistry::with_builtin_modules);

/// Module factories keyed by upper-case module name.
#[derive(Default)]
pub struct ModuleRegistry {
    factories: BTreeMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in module.
    pub fn with_builtin_modules() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// The process-wide registry of built-in modules.
    pub fn global() -> &'static ModuleRegistry {
        &REGISTRY
    }

    /// Registers `factory` under `name` (upper-cased).
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn LookupModule> + Send + Sync + 'static,
    {
        self.factories
            .insert(name.to_ascii_uppercase(), Box::new(factory));
    }

    /// Creates the module registered under `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownModule` carrying every valid name.
    pub fn lookup(&self, name: &str) -> Result<Box<dyn LookupModule>, ConfigError> {
        let key = name.to_ascii_uppercase();
        match self.factories.get(&key) {
            Some(factory) => Ok(factory()),
            None => Err(ConfigError::UnknownModule {
                name: key,
                valid: self.names(),
            }),
        }
    }

    /// Every registered module name, sorted.
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}
