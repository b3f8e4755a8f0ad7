// Shared test helpers for argument lists and file fixtures.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};

use dns_batch::Environment;

/// Stdin is a pipe (batch use).
#[allow(dead_code)] // Used by other test files
pub const PIPED: Environment = Environment {
    stdin_is_terminal: false,
};

/// Stdin is an interactive terminal (dig-like use).
#[allow(dead_code)] // Used by other test files
pub const TERMINAL: Environment = Environment {
    stdin_is_terminal: true,
};

/// Builds an owned argument vector, program name first.
#[allow(dead_code)] // Used by other test files
pub fn args(list: &[&str]) -> Vec<String> {
    std::iter::once("dns_batch")
        .chain(list.iter().copied())
        .map(str::to_string)
        .collect()
}

/// Writes `contents` to `name` inside `dir` and returns the path.
#[allow(dead_code)] // Used by other test files
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Reads a JSON-lines file into values.
#[allow(dead_code)] // Used by other test files
pub fn read_json_lines(path: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .expect("Failed to read output file")
        .lines()
        .map(|line| serde_json::from_str(line).expect("Output line should be JSON"))
        .collect()
}
