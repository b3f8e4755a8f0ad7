//! Error handling.
//!
//! This module provides the error types raised while turning command-line
//! input into a run configuration:
//! - **ConfigError**: unknown modules, invalid flag values, conflicting flags,
//!   unreadable resources, and unused arguments
//! - **InitializationError**: logger and runtime setup failures
//!
//! Errors from lookup modules and the engine are carried as `anyhow::Error`
//! with context attached by the orchestrator.

mod types;

// Re-export public API
pub use types::{ConfigError, InitializationError};
