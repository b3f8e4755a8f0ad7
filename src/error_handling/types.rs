//! Error type definitions.
//!
//! This module defines the errors raised while resolving the run
//! configuration and while initializing shared resources.

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Errors raised by the configuration pipeline.
///
/// Every variant is fatal: the pipeline stops at the first one and no
/// partial configuration is handed downstream.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No module name was given on the command line.
    #[error("No lookup module specified. Valid modules: {}", .valid.join(", "))]
    MissingModule {
        /// Every registered module name
        valid: Vec<String>,
    },

    /// The module name does not match any registered module.
    #[error("Invalid lookup module specified ({name}). Valid modules: {}", .valid.join(", "))]
    UnknownModule {
        /// Name as given (upper-cased)
        name: String,
        /// Every registered module name
        valid: Vec<String>,
    },

    /// A flag value is outside the flag's domain.
    #[error("Invalid value for --{flag} ({value:?}): {expected}")]
    InvalidValue {
        /// Flag name without leading dashes
        flag: &'static str,
        /// Offending value as given
        value: String,
        /// What would have been accepted
        expected: &'static str,
    },

    /// Two mutually exclusive flags were both set.
    #[error("--{first} and --{second} are conflicting")]
    ConflictingFlags {
        /// First flag name
        first: &'static str,
        /// Second flag name
        second: &'static str,
    },

    /// A file the configuration depends on could not be read.
    #[error("Unable to read {what} ({}): {source}", .path.display())]
    ResourceAccess {
        /// What the file holds
        what: &'static str,
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file the configuration depends on is empty.
    #[error("Empty {what} ({})", .path.display())]
    EmptyResource {
        /// What the file should hold
        what: &'static str,
        /// Path of the empty file
        path: PathBuf,
    },

    /// The OS resolver configuration could not be parsed or lists no servers.
    #[error("Unable to fetch name servers from {}: {reason}", .path.display())]
    ResolverConfig {
        /// Resolver config path
        path: PathBuf,
        /// Parse failure description
        reason: String,
    },

    /// The module needs multiple passes over its input and cannot use stdin.
    #[error("Specified module ({module}) does not allow reading from stdin")]
    StdinNotAllowed {
        /// Upper-cased module name
        module: String,
    },

    /// Positional arguments were left over and could not be used as a name.
    #[error("Unused command line arguments: {}", .0.join(" "))]
    UnusedArguments(Vec<String>),

    /// Flag syntax error, or a help/version request.
    #[error(transparent)]
    Flags(#[from] clap::Error),
}

impl ConfigError {
    /// The flag responsible for this error, when there is a single one.
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            ConfigError::InvalidValue { flag, .. } => Some(*flag),
            ConfigError::ConflictingFlags { first, .. } => Some(*first),
            ConfigError::EmptyResource {
                what: "name server file",
                ..
            } => Some("name-servers"),
            ConfigError::ResourceAccess {
                what: "name server file",
                ..
            } => Some("name-servers"),
            ConfigError::ResourceAccess {
                what: "resolver config",
                ..
            }
            | ConfigError::ResolverConfig { .. } => Some("conf-file"),
            ConfigError::StdinNotAllowed { .. } => Some("input-file"),
            _ => None,
        }
    }
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// The log file could not be opened for writing.
    #[error("Unable to open log file ({}): {source}", .path.display())]
    LogFileError {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error building the async runtime.
    #[error("Runtime initialization error: {0}")]
    RuntimeError(#[source] io::Error),
}
