//! Name input.
//!
//! Names come from exactly one place: the ad-hoc name given on the command
//! line, standard input, or the `--input-file`.

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use crate::config::{RunConfiguration, STDIO_SENTINEL};

/// One name to look up, after prefix and Alexa handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputName {
    /// Name to look up
    pub name: String,
    /// Rank from an Alexa top-sites line
    pub alexa_rank: Option<u64>,
}

/// Source of names to look up.
pub enum NameSource {
    /// The ad-hoc name from the command line (taken once)
    Single(Option<String>),
    /// Names from stdin
    Stdin(Lines<BufReader<tokio::io::Stdin>>),
    /// Names from a file
    File(Lines<BufReader<tokio::fs::File>>),
}

impl NameSource {
    /// Opens the source selected by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file cannot be opened.
    pub async fn open(config: &RunConfiguration) -> Result<Self> {
        if let Some(name) = &config.passed_name {
            return Ok(NameSource::Single(Some(name.clone())));
        }
        if config.input_file == STDIO_SENTINEL {
            info!("Reading names from stdin");
            return Ok(NameSource::Stdin(
                BufReader::new(tokio::io::stdin()).lines(),
            ));
        }
        let file = tokio::fs::File::open(&config.input_file)
            .await
            .with_context(|| format!("Failed to open input file: {}", config.input_file))?;
        Ok(NameSource::File(BufReader::new(file).lines()))
    }

    /// Read the next line from the source.
    ///
    /// Returns `Ok(Some(line))` if a line was read, `Ok(None)` if EOF,
    /// or an error if reading failed.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        match self {
            NameSource::Single(name) => Ok(name.take()),
            NameSource::Stdin(lines) => lines.next_line().await,
            NameSource::File(lines) => lines.next_line().await,
        }
    }

    /// True for the ad-hoc command-line name.
    pub fn is_single(&self) -> bool {
        matches!(self, NameSource::Single(_))
    }
}

/// Turns an input line into a name.
///
/// Blank lines and `#` comments yield `None`, as do Alexa lines that are not
/// `rank,domain`. `prefix` is prepended to every name.
pub fn parse_input_line(line: &str, prefix: &str, alexa: bool) -> Option<InputName> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (name, alexa_rank) = if alexa {
        let Some((rank, domain)) = trimmed.split_once(',') else {
            warn!("Skipping malformed Alexa line (expected rank,domain): {trimmed}");
            return None;
        };
        let Ok(rank) = rank.trim().parse::<u64>() else {
            warn!("Skipping Alexa line with non-numeric rank: {trimmed}");
            return None;
        };
        (domain.trim(), Some(rank))
    } else {
        (trimmed, None)
    };

    if name.is_empty() {
        return None;
    }

    Some(InputName {
        name: format!("{prefix}{name}"),
        alexa_rank,
    })
}
