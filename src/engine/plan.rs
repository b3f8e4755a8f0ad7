//! Plan engine.
//!
//! Walks the configured input and writes, for every name, the lookup the
//! selected module would perform: the name actually queried, the record
//! types, and the name server the lookup is assigned to. Name servers the
//! module refuses to contact are never assigned. No queries are sent.

use std::io::Write;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::config::{RunConfiguration, DEFAULT_HANDLER};
use crate::initialization::{init_semaphore, RuntimeContext};
use crate::modules::LookupModule;

use super::input::{parse_input_line, NameSource};
use super::metadata::{write_metadata, RunMetadata};
use super::output::open_output;
use super::record::RecordLayout;
use super::{LookupSummary, ResolutionEngine};

/// Engine that writes the lookup plan instead of querying.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanEngine;

impl PlanEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }
}

fn check_handler(kind: &str, handler: &str) -> Result<()> {
    if handler != DEFAULT_HANDLER {
        bail!("Invalid {kind} handler specified ({handler}). Valid handlers: {DEFAULT_HANDLER}");
    }
    Ok(())
}

impl ResolutionEngine for PlanEngine {
    fn do_lookups(
        &self,
        module: &dyn LookupModule,
        config: &RunConfiguration,
        runtime: &RuntimeContext,
    ) -> Result<LookupSummary> {
        check_handler("input", &config.input_handler)?;
        check_handler("output", &config.output_handler)?;

        let servers = usable_servers(module, &config.name_servers.servers)?;

        let started = Utc::now();
        let output = open_output(&config.output_file)?;
        let summary = runtime.block_on(plan_lookups(module, config, &servers, runtime, output))?;
        let finished = Utc::now();

        info!(
            "Planned {} lookups with {} ({} input lines skipped)",
            summary.records,
            module.name(),
            summary.skipped
        );

        if let Some(target) = &config.metadata_file {
            let metadata = RunMetadata::new(config, &summary, started, finished, runtime.seed())
                .with_module_options(module.options());
            write_metadata(target, &metadata)?;
        }

        Ok(summary)
    }
}

/// Configured name servers the module allows.
fn usable_servers(module: &dyn LookupModule, configured: &[String]) -> Result<Vec<String>> {
    let servers: Vec<String> = configured
        .iter()
        .filter(|server| module.allows_server(server))
        .cloned()
        .collect();

    let refused = configured.len() - servers.len();
    if refused > 0 {
        info!("{} refuses {} of {} name servers", module.name(), refused, configured.len());
    }
    if servers.is_empty() && !configured.is_empty() {
        bail!("{} refuses every configured name server", module.name());
    }
    Ok(servers)
}

async fn plan_lookups(
    module: &dyn LookupModule,
    config: &RunConfiguration,
    servers: &[String],
    runtime: &RuntimeContext,
    output: Box<dyn Write + Send>,
) -> Result<LookupSummary> {
    let mut source = NameSource::open(config).await?;
    let alexa = config.alexa_format && !source.is_single();
    let layout = Arc::new(RecordLayout::new(config, module));
    let semaphore = init_semaphore(config.threads);

    // Sized before any permit is taken, so it matches the task limit
    let (tx, rx) = mpsc::channel::<String>(semaphore.available_permits());
    let writer = tokio::task::spawn_blocking(move || write_lines(output, rx));

    let mut tasks = FuturesUnordered::new();
    let mut summary = LookupSummary::default();

    loop {
        let line = match source.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read line from input: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        let Some(input) = parse_input_line(&line, &config.name_prefix, alexa) else {
            summary.skipped += 1;
            continue;
        };
        summary.names += 1;

        // Selection happens here, in input order, so a seed reproduces the plan
        let resolver = runtime.random_name_server(servers).map(str::to_string);
        let query_name = module.query_name(&input.name);

        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .context("Lookup semaphore closed")?;

        let layout = Arc::clone(&layout);
        let tx = tx.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = permit;
            let record = layout.record(input, query_name, resolver, Utc::now());
            let line = serde_json::to_string(&record).context("Failed to serialize record")?;
            tx.send(line)
                .await
                .map_err(|_| anyhow!("Output writer stopped early"))
        }));
    }

    // Writer finishes once every task has dropped its sender
    drop(tx);

    while let Some(joined) = tasks.next().await {
        joined.context("Lookup task panicked")??;
    }

    summary.records = writer
        .await
        .context("Output writer panicked")?
        .context("Failed to write output")?;

    debug!(
        "{} names read, {} records written",
        summary.names, summary.records
    );
    Ok(summary)
}

fn write_lines(
    mut output: Box<dyn Write + Send>,
    mut rx: mpsc::Receiver<String>,
) -> std::io::Result<usize> {
    let mut written = 0;
    while let Some(line) = rx.blocking_recv() {
        writeln!(output, "{line}")?;
        written += 1;
    }
    output.flush()?;
    Ok(written)
}
