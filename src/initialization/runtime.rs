//! Runtime context.
//!
//! Holds the process-wide resources built once the configuration is valid:
//! the seeded random source used for name server selection and the async
//! runtime the engine runs on.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::{Builder, Runtime};

use crate::error_handling::InitializationError;

/// Seeded random source plus the async runtime.
pub struct RuntimeContext {
    rng: Mutex<StdRng>,
    seed: u64,
    runtime: Runtime,
    worker_threads: Option<NonZeroUsize>,
}

impl RuntimeContext {
    /// Builds a context seeded from the wall clock.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::RuntimeError` if the runtime cannot be built.
    pub fn new(parallelism: Option<NonZeroUsize>) -> Result<Self, InitializationError> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(parallelism, seed)
    }

    /// Builds a context with an explicit seed, for reproducible runs.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::RuntimeError` if the runtime cannot be built.
    pub fn with_seed(
        parallelism: Option<NonZeroUsize>,
        seed: u64,
    ) -> Result<Self, InitializationError> {
        let mut builder = Builder::new_multi_thread();
        builder.enable_all();
        if let Some(workers) = parallelism {
            builder.worker_threads(workers.get());
        }
        let runtime = builder.build().map_err(InitializationError::RuntimeError)?;

        debug!(
            "Runtime ready (seed {}, worker threads {})",
            seed,
            parallelism.map_or_else(|| "default".to_string(), |n| n.to_string())
        );

        Ok(Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed,
            runtime,
            worker_threads: parallelism,
        })
    }

    /// Seed of the random source.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Worker threads requested for the runtime, if any.
    pub fn worker_threads(&self) -> Option<NonZeroUsize> {
        self.worker_threads
    }

    /// Picks one of `servers` uniformly at random.
    pub fn random_name_server<'a>(&self, servers: &'a [String]) -> Option<&'a str> {
        if servers.is_empty() {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let index = rng.random_range(0..servers.len());
        Some(servers[index].as_str())
    }

    /// Runs `future` to completion on the runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn servers() -> Vec<String> {
        (1..=5).map(|i| format!("192.0.2.{i}:53")).collect()
    }

    #[test]
    fn test_same_seed_same_choices() {
        let servers = servers();
        let a = RuntimeContext::with_seed(NonZeroUsize::new(1), 42).unwrap();
        let b = RuntimeContext::with_seed(NonZeroUsize::new(1), 42).unwrap();

        let picks_a: Vec<&str> = (0..20).filter_map(|_| a.random_name_server(&servers)).collect();
        let picks_b: Vec<&str> = (0..20).filter_map(|_| b.random_name_server(&servers)).collect();
        assert_eq!(picks_a, picks_b);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_random_name_server_stays_in_list() {
        let servers = servers();
        let ctx = RuntimeContext::with_seed(None, 7).unwrap();
        for _ in 0..50 {
            let pick = ctx.random_name_server(&servers).unwrap();
            assert!(servers.iter().any(|s| s == pick));
        }
        assert_eq!(ctx.random_name_server(&[]), None);
    }

    #[test]
    fn test_worker_threads_follow_parallelism() {
        let ctx = RuntimeContext::with_seed(NonZeroUsize::new(2), 1).unwrap();
        assert_eq!(ctx.worker_threads(), NonZeroUsize::new(2));
        assert_eq!(ctx.block_on(async { 40 + 2 }), 42);
    }
}
