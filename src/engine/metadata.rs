//! Run metadata.
//!
//! A single JSON document describing a finished run: the effective
//! configuration, the seed, and what was read and written.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::RunConfiguration;

use super::output::open_output;
use super::LookupSummary;

/// Metadata written to `--metadata-file`.
#[derive(Debug, Serialize)]
pub struct RunMetadata<'a> {
    /// Crate version that produced the run
    pub version: &'static str,
    /// Names accepted from the input
    pub names: usize,
    /// Records written to the output
    pub records: usize,
    /// Input lines that were skipped
    pub skipped: usize,
    /// When lookups started
    pub start_time: String,
    /// When lookups finished
    pub end_time: String,
    /// Seed of the name server selection
    pub seed: u64,
    /// Effective configuration
    pub configuration: &'a RunConfiguration,
    #[serde(skip_serializing_if = "Map::is_empty")]
    /// Settings of the lookup module
    pub module_options: Map<String, Value>,
}

impl<'a> RunMetadata<'a> {
    /// Collects metadata for a finished run.
    pub fn new(
        config: &'a RunConfiguration,
        summary: &LookupSummary,
        started: DateTime<Utc>,
        finished: DateTime<Utc>,
        seed: u64,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            names: summary.names,
            records: summary.records,
            skipped: summary.skipped,
            start_time: config.time_format.format(started),
            end_time: config.time_format.format(finished),
            seed,
            configuration: config,
            module_options: Map::new(),
        }
    }

    /// Attaches the module's own settings.
    pub fn with_module_options(mut self, options: Map<String, Value>) -> Self {
        self.module_options = options;
        self
    }
}

/// Writes `metadata` as one JSON document to `target` (`-` for stdout).
///
/// # Errors
///
/// Returns an error if the target cannot be created or written.
pub fn write_metadata(target: &str, metadata: &RunMetadata<'_>) -> Result<()> {
    let mut out = open_output(target)?;
    serde_json::to_writer(&mut out, metadata).context("Failed to serialize run metadata")?;
    writeln!(out).context("Failed to write run metadata")?;
    out.flush().context("Failed to write run metadata")?;
    Ok(())
}
