//! Size-rotated line writer.
//!
//! Backups are numbered: `spans.jsonl.1` is the most recent, `spans.jsonl.N`
//! the oldest, and nothing beyond `max_backups` is kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the live file reaches 5 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Rotated files kept next to the live one.
pub const MAX_BACKUP_FILES: usize = 3;

/// Appends lines to a file, rotating it by size.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened on first write.
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, or an error
    /// if a previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("span log lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.max_bytes) {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let handle = file.as_mut().ok_or_else(|| io::Error::other("span log not open"))?;

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    /// Shifts `.k` to `.k+1`, dropping the oldest, then moves the live file to `.1`.
    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.max_backups))?;
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
