//! Output records.
//!
//! Each planned lookup is written as one JSON object per line. Which fields
//! appear depends on the output groups: the result verbosity tier first,
//! then any `--include-fields`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{DnsClass, ResultVerbosity, RunConfiguration, TimeFormat, TransportMode};
use crate::modules::{LookupModule, RecordType};

use super::input::InputName;

/// Status carried by every record the plan engine writes.
pub const PLANNED_STATUS: &str = "PLANNED";

/// One line of engine output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRecord {
    /// Name as read from the input
    pub name: String,
    /// Module that will look the name up
    pub module: String,
    /// Always `PLANNED`
    pub status: &'static str,
    /// When the record was produced
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Name actually queried, when the module rewrites it
    pub query_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Record types the module queries
    pub types: Option<Vec<RecordType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Prefix a TXT answer must start with to be kept
    pub policy_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Queried class
    pub class: Option<DnsClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Name server the lookup is assigned to
    pub resolver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Transport restriction
    pub protocol: Option<TransportMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Rank from an Alexa input line
    pub alexa_rank: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Per-name timeout
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Retries on timeout or temporary failure
    pub retries: Option<usize>,
}

/// Which optional fields a record carries, derived once per run.
#[derive(Debug, Clone)]
pub struct RecordLayout {
    module: String,
    types: Vec<RecordType>,
    policy_prefix: Option<String>,
    tier: ResultVerbosity,
    class: Option<DnsClass>,
    with_resolver: bool,
    protocol: Option<TransportMode>,
    limits: Option<(u64, usize)>,
    time_format: TimeFormat,
}

impl RecordLayout {
    /// Builds the layout for `module` under `config`.
    pub fn new(config: &RunConfiguration, module: &dyn LookupModule) -> Self {
        let tier = config.result_verbosity;
        let detailed = tier >= ResultVerbosity::Long;
        let trace = tier == ResultVerbosity::Trace;

        Self {
            module: module.name().to_string(),
            types: module.query_types(),
            policy_prefix: module.policy_prefix().map(str::to_string),
            tier,
            class: (detailed || config.includes_group("class")).then_some(config.class),
            with_resolver: detailed || config.includes_group("resolver"),
            protocol: (trace || config.includes_group("protocol")).then_some(config.transport),
            limits: trace.then_some((config.timeout.as_secs(), config.retries)),
            time_format: config.time_format,
        }
    }

    /// Shapes one record.
    pub fn record(
        &self,
        input: InputName,
        query_name: String,
        resolver: Option<String>,
        now: DateTime<Utc>,
    ) -> PlanRecord {
        let normal = self.tier >= ResultVerbosity::Normal;
        let query_name = (normal && query_name != input.name).then_some(query_name);

        PlanRecord {
            name: input.name,
            module: self.module.clone(),
            status: PLANNED_STATUS,
            timestamp: self.time_format.format(now),
            query_name,
            types: normal.then(|| self.types.clone()),
            policy_prefix: self.policy_prefix.clone().filter(|_| normal),
            class: self.class,
            resolver: resolver.filter(|_| self.with_resolver),
            protocol: self.protocol,
            alexa_rank: input.alexa_rank,
            timeout_secs: self.limits.map(|(timeout, _)| timeout),
            retries: self.limits.map(|(_, retries)| retries),
        }
    }
}
