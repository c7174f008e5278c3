//! Display device sinks.
//!
//! The hardware protocol lives behind [`DisplayDevice`]. The crate ships a JSON
//! file sink (read by the MFD bridge) and a plain-text sink for terminals.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::core::errors::{EdxError, Result};
use crate::display::page::{Display, Page};

/// Anything that can show a [`Display`].
pub trait DisplayDevice: Send + Sync {
    /// Push every page of `display` to the device.
    fn write(&self, display: &Display) -> Result<()>;
}

#[derive(Serialize)]
struct MfdDocument<'a> {
    written_at: DateTime<Utc>,
    pages: &'a [Page],
}

/// Writes the display as a JSON document, replacing the file atomically.
#[derive(Debug, Clone)]
pub struct JsonFileDevice {
    path: PathBuf,
}

impl JsonFileDevice {
    /// Prepare the output location. Fails when the parent directory cannot be
    /// created or is read-only.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| EdxError::io(parent, e))?;
            let meta = fs::metadata(parent).map_err(|e| EdxError::io(parent, e))?;
            if meta.permissions().readonly() {
                return Err(EdxError::Device {
                    details: format!("output directory {} is read-only", parent.display()),
                });
            }
        }
        Ok(Self { path })
    }

    /// Target file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplayDevice for JsonFileDevice {
    fn write(&self, display: &Display) -> Result<()> {
        let doc = MfdDocument {
            written_at: Utc::now(),
            pages: &display.pages,
        };
        let json = serde_json::to_string_pretty(&doc)?;
        write_atomic(&self.path, json.as_bytes()).map_err(|e| EdxError::Device {
            details: format!("cannot write {}: {e}", self.path.display()),
        })?;
        let page_count = display.len();
        debug!(path = %self.path.display(), pages = page_count, "mfd document written");
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    let result = (|| {
        {
            let mut opts = OpenOptions::new();
            opts.write(true).create(true).truncate(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt as _;
                opts.mode(0o644);
            }
            let mut file = opts.open(&tmp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Writes framed text pages to any writer (stdout for `edx52d render`).
pub struct TextDevice<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TextDevice<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> DisplayDevice for TextDevice<W> {
    fn write(&self, display: &Display) -> Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{display}")
            .and_then(|()| out.flush())
            .map_err(|e| EdxError::Device {
                details: format!("text output failed: {e}"),
            })
    }
}
