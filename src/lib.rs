//! dns_batch library: configuration resolution for batch DNS lookups
//!
//! This library turns command-line input into one validated run
//! configuration and hands it to a lookup module and a resolution engine.
//! The pipeline selects a module by name, lets it register its own flags,
//! parses everything in one pass, then normalizes values, chooses name
//! servers, composes output groups, and checks flag combinations before a
//! single lookup is planned.
//!
//! # Example
//!
//! ```no_run
//! use dns_batch::run_cli;
//!
//! let args = ["dns_batch", "A", "--name-servers", "1.1.1.1", "--input-file", "names.txt"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let report = run_cli(args)?;
//! println!("Planned {} lookups", report.summary.records);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
mod error_handling;
pub mod initialization;
pub mod modules;
pub mod nameservers;
mod run;

// Re-export public API
pub use config::RunConfiguration;
pub use engine::{LookupSummary, PlanEngine, ResolutionEngine};
pub use error_handling::{ConfigError, InitializationError};
pub use initialization::RuntimeContext;
pub use modules::{LookupModule, ModuleRegistry};
pub use nameservers::{NameServerSource, NameServers};
pub use run::{
    hand_off, parse_invocation, resolve_configuration, run_cli, run_with, Environment,
    Invocation, RunReport,
};
