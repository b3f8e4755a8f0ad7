//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources a run
//! needs once its configuration is valid:
//! - Logger (level, format, optional log file)
//! - Runtime context (seeded random source and async runtime)
//! - Concurrency semaphore for lookup tasks

mod logger;
mod runtime;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use logger::init_logger_with;
pub use runtime::RuntimeContext;

/// Initializes a semaphore for controlling concurrency.
///
/// Creates a new semaphore with the specified permit count, raised to one
/// when zero and capped at `Semaphore::MAX_PERMITS`. This semaphore limits
/// the number of concurrent lookup tasks.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent operations allowed
///
/// # Returns
///
/// An `Arc<Semaphore>` that can be shared across multiple tasks.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.clamp(1, Semaphore::MAX_PERMITS)))
}
