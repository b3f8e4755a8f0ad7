//! Resolution engines.
//!
//! The engine receives the validated configuration, the initialized lookup
//! module, and the runtime context, and performs the lookups for every
//! input name. The built-in `PlanEngine` writes the lookup plan without
//! sending queries.

mod input;
mod metadata;
mod output;
mod plan;
mod record;

use anyhow::Result;

use crate::config::RunConfiguration;
use crate::initialization::RuntimeContext;
use crate::modules::LookupModule;

// Re-export public API
pub use input::{parse_input_line, InputName, NameSource};
pub use metadata::{write_metadata, RunMetadata};
pub use output::open_output;
pub use plan::PlanEngine;
pub use record::{PlanRecord, RecordLayout, PLANNED_STATUS};

/// Counts reported by an engine after all lookups completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupSummary {
    /// Names accepted from the input
    pub names: usize,
    /// Records written to the output
    pub records: usize,
    /// Input lines that were skipped (blank, comments, malformed)
    pub skipped: usize,
}

/// Performs the lookups of one run.
pub trait ResolutionEngine {
    /// Looks up every input name with `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if input or output cannot be opened, or a lookup
    /// fails in a way that stops the run.
    fn do_lookups(
        &self,
        module: &dyn LookupModule,
        config: &RunConfiguration,
        runtime: &RuntimeContext,
    ) -> Result<LookupSummary>;
}
