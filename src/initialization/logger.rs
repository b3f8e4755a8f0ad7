//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::fs::{File, OpenOptions};
use std::io::{IsTerminal, Write};
use std::path::Path;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level, format, and destination.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it for this crate.
///
/// # Arguments
///
/// * `level` - Minimum log level to display
/// * `format` - Log format (Plain or Json)
/// * `log_file` - Append logs to this file instead of stderr
///
/// # Errors
///
/// Returns `InitializationError::LogFileError` if the log file cannot be
/// opened, and `InitializationError::LoggerError` if a logger is already set.
pub fn init_logger_with(
    level: LevelFilter,
    format: LogFormat,
    log_file: Option<&Path>,
) -> Result<(), InitializationError> {
    let file = log_file.map(open_log_file).transpose()?;

    colored::control::set_override(use_colors(file.is_some()));

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("dns_batch", level);

    if let Some(file) = file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    log::Level::Error => "❌",
                    log::Level::Warn => "⚠️",
                    log::Level::Info => "✔️",
                    log::Level::Debug => "🔍",
                    log::Level::Trace => "🔬",
                };

                writeln!(
                    buf,
                    "{} {} {} [{}] {}",
                    emoji,
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so a second initialization reports an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Colors only make sense on a terminal.
fn use_colors(to_file: bool) -> bool {
    !to_file && std::io::stderr().is_terminal()
}

fn open_log_file(path: &Path) -> Result<File, InitializationError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| InitializationError::LogFileError {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_plain_format() {
        // env_logger can only be initialized once per process
        let _ = env_logger::try_init();

        let result = init_logger_with(LevelFilter::Info, LogFormat::Plain, None);
        // Only the already-initialized error is acceptable
        assert!(matches!(
            result,
            Ok(()) | Err(InitializationError::LoggerError(_))
        ));
    }

    #[test]
    fn test_init_logger_json_format() {
        let _ = env_logger::try_init();

        let result = init_logger_with(LevelFilter::Info, LogFormat::Json, None);
        assert!(matches!(
            result,
            Ok(()) | Err(InitializationError::LoggerError(_))
        ));
    }

    #[test]
    fn test_log_file_is_created() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("run.log");

        // The file is opened before the logger is installed
        let _ = init_logger_with(LevelFilter::Warn, LogFormat::Plain, Some(&path));
        assert!(path.exists());
    }

    #[test]
    fn test_colors_follow_stderr_terminal() {
        assert!(!use_colors(true));
        assert_eq!(use_colors(false), std::io::stderr().is_terminal());
    }

    #[test]
    fn test_log_file_is_appended_to() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("run.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let mut file = open_log_file(&path).expect("Should open existing log file");
        writeln!(file, "this run").unwrap();
        drop(file);
        let _ = init_logger_with(LevelFilter::Warn, LogFormat::Plain, Some(&path));

        let contents = std::fs::read_to_string(&path).unwrap();
        // Other tests may log here once this logger is installed
        assert!(contents.starts_with("earlier run\nthis run\n"), "log: {contents}");
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let result = init_logger_with(
            LevelFilter::Warn,
            LogFormat::Plain,
            Some(Path::new("/nonexistent/dir/run.log")),
        );
        assert!(matches!(
            result,
            Err(InitializationError::LogFileError { .. })
        ));
    }
}
