//! Structured logging setup.
//!
//! Library code logs through `tracing` macros; the binary installs one `fmt`
//! subscriber writing to stderr or, when configured, to an append-only file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::errors::{EdxError, Result};

/// Build the level filter. `RUST_LOG`, when set and valid, wins over `level`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber.
///
/// With `file` set, output is appended there without ANSI colors; otherwise it
/// goes to stderr. Fails if the file cannot be opened or a subscriber is
/// already installed.
pub fn init(level: &str, file: Option<&Path>) -> Result<()> {
    let filter = build_filter(level);
    let installed = match file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| EdxError::io(parent, e))?;
            }
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| EdxError::io(path, e))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| EdxError::Runtime {
        details: format!("logging already initialized: {e}"),
    })
}
