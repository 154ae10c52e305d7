//! File-backed tracing setup.
//!
//! The terminal is owned by the shell loop, so diagnostics go to
//! `~/.tempshell/client.log`. `TEMPSHELL_LOG` filters the sink; the default
//! records warnings and errors only.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::config::LOG_FILTER_ENV_VAR;

const LOG_DIR: &str = ".tempshell";
const LOG_FILE: &str = "client.log";

/// Opens the sink in append mode so earlier runs stay inspectable.
fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber with a file sink. Errors are returned so
/// the caller can degrade to running without a log file.
pub fn init() -> io::Result<()> {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    let log_dir = PathBuf::from(&home).join(LOG_DIR);
    std::fs::create_dir_all(&log_dir)?;
    let log_file = open_log_file(&log_dir.join(LOG_FILE))?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    Ok(())
}
