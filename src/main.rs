//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_batch` library that handles:
//! - Collecting command-line arguments
//! - User-facing error output and exit codes
//!
//! All core functionality is implemented in the library crate.

use std::process;

use dns_batch::{run_cli, ConfigError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if let Err(e) = run_cli(args) {
        // Let clap render help, version, and usage errors with its own exit code
        if let Some(ConfigError::Flags(clap_error)) = e.downcast_ref::<ConfigError>() {
            clap_error.exit();
        }
        eprintln!("dns_batch error: {:#}", e);
        process::exit(1);
    }
}
