//! Built-in lookup modules.
//!
//! - One raw module per record type (`A`, `MX`, `TXT`, ...)
//! - `ALOOKUP`, `MXLOOKUP`, `NSLOOKUP`: follow-up address lookups
//! - `SPF`, `DMARC`: TXT lookups filtered to a policy record
//! - `AXFR`: zone transfer from each authoritative server

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::debug;
use serde::Serialize;
use serde_json::{json, Map, Value};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use super::{LookupModule, ModuleRegistry};
use crate::config::{RunConfiguration, TransportMode};

/// Record types the built-in modules query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)] // Standard record type mnemonics
pub enum RecordType {
    A,
    Aaaa,
    Afsdb,
    Any,
    Axfr,
    Caa,
    Cname,
    Dnskey,
    Ds,
    Mx,
    Naptr,
    Ns,
    Nsec,
    Nsec3,
    Nsec3param,
    Ptr,
    Rrsig,
    Soa,
    Spf,
    Srv,
    Sshfp,
    Tlsa,
    Txt,
}

pub(super) fn register_all(registry: &mut ModuleRegistry) {
    for record_type in RecordType::iter().filter(|rt| *rt != RecordType::Axfr) {
        registry.register(record_type.into(), move || {
            Box::new(RawLookup::new(record_type))
        });
    }
    registry.register("ALOOKUP", || Box::new(AddressLookup::default()));
    registry.register("MXLOOKUP", || Box::new(MxLookup::default()));
    registry.register("NSLOOKUP", || Box::new(NsLookup::default()));
    registry.register("SPF", || Box::new(TxtRecordLookup::spf()));
    registry.register("DMARC", || Box::new(TxtRecordLookup::dmarc()));
    registry.register("AXFR", || Box::new(ZoneTransfer::default()));
}

fn flag_set(flags: &ArgMatches, id: &str) -> bool {
    flags
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

/// Which address families a follow-up lookup resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IpVersions {
    ipv4: bool,
    ipv6: bool,
}

impl Default for IpVersions {
    fn default() -> Self {
        Self {
            ipv4: true,
            ipv6: false,
        }
    }
}

impl IpVersions {
    fn register_flags(cmd: Command) -> Command {
        cmd.arg(
            Arg::new("ipv4-lookup")
                .long("ipv4-lookup")
                .action(ArgAction::SetTrue)
                .help("Perform an IPv4 lookup (A records)"),
        )
        .arg(
            Arg::new("ipv6-lookup")
                .long("ipv6-lookup")
                .action(ArgAction::SetTrue)
                .help("Perform an IPv6 lookup (AAAA records)"),
        )
    }

    /// Neither flag set means IPv4 only.
    fn from_flags(flags: &ArgMatches) -> Self {
        let ipv4 = flag_set(flags, "ipv4-lookup");
        let ipv6 = flag_set(flags, "ipv6-lookup");
        if !ipv4 && !ipv6 {
            return Self::default();
        }
        Self { ipv4, ipv6 }
    }

    fn record_types(self) -> Vec<RecordType> {
        let mut types = Vec::with_capacity(2);
        if self.ipv4 {
            types.push(RecordType::A);
        }
        if self.ipv6 {
            types.push(RecordType::Aaaa);
        }
        types
    }
}

/// Queries a single record type for every name.
#[derive(Debug, Clone)]
pub struct RawLookup {
    record_type: RecordType,
    name: &'static str,
}

impl RawLookup {
    /// Creates a raw lookup for `record_type`.
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            name: record_type.into(),
        }
    }
}

impl LookupModule for RawLookup {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Raw lookup of a single record type"
    }

    fn initialize(&mut self, _config: &RunConfiguration, _flags: &ArgMatches) -> Result<()> {
        Ok(())
    }

    fn query_types(&self) -> Vec<RecordType> {
        vec![self.record_type]
    }
}

/// Resolves every address of a name, following CNAMEs.
#[derive(Debug, Clone, Default)]
pub struct AddressLookup {
    versions: IpVersions,
}

impl LookupModule for AddressLookup {
    fn name(&self) -> &str {
        "ALOOKUP"
    }

    fn description(&self) -> &str {
        "A and AAAA lookup following CNAME chains"
    }

    fn register_flags(&self, cmd: Command) -> Command {
        IpVersions::register_flags(cmd)
    }

    fn initialize(&mut self, _config: &RunConfiguration, flags: &ArgMatches) -> Result<()> {
        self.versions = IpVersions::from_flags(flags);
        Ok(())
    }

    fn query_types(&self) -> Vec<RecordType> {
        self.versions.record_types()
    }
}

/// Mail exchangers of a name plus the addresses of each exchanger.
#[derive(Debug, Clone)]
pub struct MxLookup {
    versions: IpVersions,
    cache_size: usize,
}

impl Default for MxLookup {
    fn default() -> Self {
        Self {
            versions: IpVersions::default(),
            cache_size: 1000,
        }
    }
}

impl LookupModule for MxLookup {
    fn name(&self) -> &str {
        "MXLOOKUP"
    }

    fn description(&self) -> &str {
        "MX lookup with addresses of each exchanger"
    }

    fn register_flags(&self, cmd: Command) -> Command {
        IpVersions::register_flags(cmd).arg(
            Arg::new("mx-cache-size")
                .long("mx-cache-size")
                .value_parser(value_parser!(usize))
                .default_value("1000")
                .help("Number of records to store in the MX -> A/AAAA cache"),
        )
    }

    fn initialize(&mut self, _config: &RunConfiguration, flags: &ArgMatches) -> Result<()> {
        self.versions = IpVersions::from_flags(flags);
        if let Some(size) = flags.try_get_one::<usize>("mx-cache-size").ok().flatten() {
            self.cache_size = *size;
        }
        debug!("MXLOOKUP exchanger cache holds {} entries", self.cache_size);
        Ok(())
    }

    fn query_types(&self) -> Vec<RecordType> {
        let mut types = vec![RecordType::Mx];
        types.extend(self.versions.record_types());
        types
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert("mx_cache_size".to_string(), json!(self.cache_size));
        options
    }
}

/// Name servers of a name plus the addresses of each server.
#[derive(Debug, Clone, Default)]
pub struct NsLookup {
    versions: IpVersions,
}

impl LookupModule for NsLookup {
    fn name(&self) -> &str {
        "NSLOOKUP"
    }

    fn description(&self) -> &str {
        "NS lookup with addresses of each name server"
    }

    fn register_flags(&self, cmd: Command) -> Command {
        IpVersions::register_flags(cmd)
    }

    fn initialize(&mut self, _config: &RunConfiguration, flags: &ArgMatches) -> Result<()> {
        self.versions = IpVersions::from_flags(flags);
        Ok(())
    }

    fn query_types(&self) -> Vec<RecordType> {
        let mut types = vec![RecordType::Ns];
        types.extend(self.versions.record_types());
        types
    }
}

/// TXT lookup keeping only the record that starts with a policy prefix.
#[derive(Debug, Clone)]
pub struct TxtRecordLookup {
    name: &'static str,
    description: &'static str,
    label: Option<&'static str>,
    prefix: &'static str,
}

impl TxtRecordLookup {
    /// Sender Policy Framework record of the name itself.
    pub fn spf() -> Self {
        Self {
            name: "SPF",
            description: "SPF policy lookup (TXT v=spf1)",
            label: None,
            prefix: "v=spf1",
        }
    }

    /// DMARC policy record, published under `_dmarc.<name>`.
    pub fn dmarc() -> Self {
        Self {
            name: "DMARC",
            description: "DMARC policy lookup (TXT v=DMARC1 at _dmarc)",
            label: Some("_dmarc"),
            prefix: "v=DMARC1",
        }
    }
}

impl LookupModule for TxtRecordLookup {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn initialize(&mut self, _config: &RunConfiguration, _flags: &ArgMatches) -> Result<()> {
        Ok(())
    }

    fn query_types(&self) -> Vec<RecordType> {
        vec![RecordType::Txt]
    }

    fn query_name(&self, name: &str) -> String {
        match self.label {
            Some(label) => format!("{label}.{name}"),
            None => name.to_string(),
        }
    }

    fn policy_prefix(&self) -> Option<&str> {
        Some(self.prefix)
    }
}

/// Zone transfer (AXFR) from every authoritative server of a name.
#[derive(Debug, Clone, Default)]
pub struct ZoneTransfer {
    blacklist_file: Option<PathBuf>,
    blacklist: Vec<String>,
}

/// Host part of `host:port`, without IPv6 brackets.
fn server_host(server: &str) -> &str {
    server
        .rsplit_once(':')
        .map_or(server, |(host, _)| host)
        .trim_start_matches('[')
        .trim_end_matches(']')
}

impl LookupModule for ZoneTransfer {
    fn name(&self) -> &str {
        "AXFR"
    }

    fn description(&self) -> &str {
        "Zone transfer from each authoritative name server"
    }

    fn register_flags(&self, cmd: Command) -> Command {
        cmd.arg(
            Arg::new("blacklist-file")
                .long("blacklist-file")
                .value_parser(value_parser!(PathBuf))
                .help("Name server addresses that should not be contacted"),
        )
    }

    fn initialize(&mut self, config: &RunConfiguration, flags: &ArgMatches) -> Result<()> {
        if config.transport == TransportMode::UdpOnly {
            bail!("zone transfers require TCP and cannot run with --udp-only");
        }

        self.blacklist_file = flags
            .try_get_one::<PathBuf>("blacklist-file")
            .ok()
            .flatten()
            .cloned();

        if let Some(path) = &self.blacklist_file {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Unable to read blacklist file ({})", path.display()))?;
            self.blacklist = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect();
            debug!("AXFR blacklist holds {} entries", self.blacklist.len());
        }
        Ok(())
    }

    fn query_types(&self) -> Vec<RecordType> {
        vec![RecordType::Ns, RecordType::Axfr]
    }

    /// Blacklist entries match either the full `host:port` or the host alone.
    fn allows_server(&self, server: &str) -> bool {
        let host = server_host(server);
        !self
            .blacklist
            .iter()
            .any(|entry| entry == server || entry == host)
    }

    fn options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        if let Some(path) = &self.blacklist_file {
            options.insert("blacklist_file".to_string(), json!(path.display().to_string()));
            options.insert("blacklist_entries".to_string(), json!(self.blacklist.len()));
        }
        options
    }
}
