//! Tracing subscriber setup.
//!
//! The focus utility and the scanners write to one plain-text log file next
//! to the executables. Some tools start it fresh, others append to it.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "romshelf.log";

/// How an existing log file is treated when a tool starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Append,
    Truncate,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path, mode: LogMode) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        LogMode::Append => options.append(true),
        LogMode::Truncate => options.write(true).truncate(true),
    };
    options.open(path)
}

/// Installs the global subscriber writing to `path`.
///
/// Falls back to stderr when the file cannot be opened. Must be called at
/// most once per process.
pub fn init_file_logging(path: &Path, mode: LogMode) {
    match open_log_file(path, mode) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        Err(e) => {
            init_console_logging();
            tracing::warn!(path = %path.display(), error = %e, "cannot open log file, logging to stderr");
        }
    }
}

/// Installs the global subscriber writing to stderr.
pub fn init_console_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}
