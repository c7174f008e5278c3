//! Incremental journal tailing with rotation and truncation detection.
//!
//! The game writes one `Journal.<timestamp>.<part>.log` per session and only
//! ever appends to it. Each poll picks the most recently modified journal,
//! reads the bytes appended since the stored cursor, and hands back complete
//! lines. A trailing record without its newline stays unread until the game
//! finishes writing it.

use std::fs::{self, File, Metadata};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use regex::Regex;
use tracing::{debug, warn};

use crate::core::errors::{EdxError, Result};

/// File names the game uses for session journals (`Journal.*.*.log`).
pub const JOURNAL_FILE_PATTERN: &str = r"^Journal\..*\..*\.log$";

/// Identity of a tailed file: its path plus, where the platform exposes one,
/// its inode. A file replaced in place gets a new identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    /// Path the file was opened through.
    pub path: PathBuf,
    /// Inode number on Unix; `None` elsewhere.
    pub inode: Option<u64>,
}

impl FileIdentity {
    fn of(path: &Path, meta: &Metadata) -> Self {
        Self {
            path: path.to_path_buf(),
            inode: inode_of(meta),
        }
    }
}

#[cfg(unix)]
fn inode_of(meta: &Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt as _;
    Some(meta.ino())
}

#[cfg(not(unix))]
fn inode_of(_meta: &Metadata) -> Option<u64> {
    None
}

/// Read position inside one journal file. `offset` never exceeds the file
/// size observed when it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailCursor {
    /// File the offset belongs to.
    pub identity: FileIdentity,
    /// Byte offset just past the last consumed newline.
    pub offset: u64,
}

/// Tails the newest journal file in a folder.
#[derive(Debug)]
pub struct JournalTailer {
    file_pattern: Regex,
    cursor: Option<TailCursor>,
}

impl JournalTailer {
    /// Tailer matching the standard journal file names.
    pub fn new() -> Result<Self> {
        Self::with_pattern(JOURNAL_FILE_PATTERN)
    }

    /// Tailer matching file names against a custom regular expression.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let file_pattern = Regex::new(pattern).map_err(|err| EdxError::InvalidConfig {
            details: format!("journal file pattern {pattern:?}: {err}"),
        })?;
        Ok(Self {
            file_pattern,
            cursor: None,
        })
    }

    /// Current cursor, if any file has been read yet.
    #[must_use]
    pub const fn cursor(&self) -> Option<&TailCursor> {
        self.cursor.as_ref()
    }

    /// Newest journal in `folder` by modification time. Equal times are broken
    /// by the lexicographically greatest file name, so the choice does not
    /// depend on directory order.
    #[must_use]
    pub fn find_journal_file(&self, folder: &Path) -> Option<PathBuf> {
        let entries = match fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(folder = %folder.display(), error = %err, "cannot list journal folder");
                return None;
            }
        };

        let mut newest: Option<(SystemTime, String, PathBuf)> = None;
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.file_pattern.is_match(&name) {
                continue;
            }
            let Ok(modified) = entry.metadata().and_then(|meta| meta.modified()) else {
                continue;
            };
            let candidate = (modified, name, entry.path());
            if newest
                .as_ref()
                .is_none_or(|best| (candidate.0, &candidate.1) > (best.0, &best.1))
            {
                newest = Some(candidate);
            }
        }
        newest.map(|(_, _, path)| path)
    }

    /// Lines appended to the newest journal since the last poll.
    ///
    /// No journal, or any I/O failure, yields an empty list and leaves the
    /// cursor as it was.
    pub fn poll(&mut self, folder: &Path) -> Vec<String> {
        let Some(path) = self.find_journal_file(folder) else {
            return Vec::new();
        };
        match self.read_new_lines(&path) {
            Ok(lines) => lines,
            Err(err) => {
                warn!(error = %err, "journal read failed, skipping this cycle");
                Vec::new()
            }
        }
    }

    fn read_new_lines(&mut self, path: &Path) -> Result<Vec<String>> {
        let mut file = File::open(path).map_err(|source| EdxError::io(path, source))?;
        let meta = file.metadata().map_err(|source| EdxError::io(path, source))?;
        let identity = FileIdentity::of(path, &meta);
        let size = meta.len();

        let mut offset = match &self.cursor {
            Some(cursor) if cursor.identity == identity => cursor.offset,
            Some(cursor) => {
                debug!(
                    from = %cursor.identity.path.display(),
                    to = %path.display(),
                    "switching to new journal file"
                );
                0
            }
            None => 0,
        };
        if offset > size {
            debug!(path = %path.display(), offset, size, "journal shrank, rereading from start");
            offset = 0;
        }

        file.seek(SeekFrom::Start(offset))
            .map_err(|source| EdxError::io(path, source))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .map_err(|source| EdxError::io(path, source))?;

        let consumed = memchr::memrchr(b'\n', &buf).map_or(0, |idx| idx + 1);
        let lines = split_lines(&buf[..consumed]);
        self.cursor = Some(TailCursor {
            identity,
            offset: offset + consumed as u64,
        });
        Ok(lines)
    }
}

fn split_lines(buf: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut start = 0;
    for end in memchr::memchr_iter(b'\n', buf) {
        let mut line = &buf[start..end];
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
        if !line.is_empty() {
            lines.push(String::from_utf8_lossy(line).into_owned());
        }
        start = end + 1;
    }
    lines
}
