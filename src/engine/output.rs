//! Output targets.

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};

use anyhow::{Context, Result};

use crate::config::STDIO_SENTINEL;

/// Writer wrapper that ignores broken pipe errors.
///
/// When output is piped to a command like `head` that closes early, writes
/// fail with `BrokenPipe`. That is a normal way for a pipeline to end, not
/// an error of this run.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Opens `target` for writing; `-` is standard output.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output(target: &str) -> Result<Box<dyn Write + Send>> {
    if target == STDIO_SENTINEL {
        return Ok(Box::new(IgnoreBrokenPipe::new(io::stdout())));
    }
    let file = File::create(target).with_context(|| format!("Failed to create output file: {target}"))?;
    Ok(Box::new(BufWriter::new(file)))
}
