//! Append-only line writer that rotates by size.
//!
//! When the file grows past the limit it is renamed to
//! `<stem>.<n>.json` (1 is newest) and older backups shift up; anything past
//! the retention count is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 10 MB.
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

pub const DEFAULT_BACKUPS: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    /// The file is opened lazily on the first write.
    #[must_use]
    pub const fn new(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    /// Path of backup `n` (1-based).
    fn backup_path(&self, n: usize) -> PathBuf {
        let stem = self.path.file_stem().and_then(|s| s.to_str()).unwrap_or("trace");
        let ext = self.path.extension().and_then(|s| s.to_str()).unwrap_or("json");
        self.path.with_file_name(format!("{stem}.{n}.{ext}"))
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from rotating, opening or writing the file.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        let full = fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.max_bytes);
        if full {
            *guard = None;
            self.rotate()?;
        }

        let file = match guard.as_mut() {
            Some(file) => file,
            None => guard.insert(OpenOptions::new().create(true).append(true).open(&self.path)?),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.backups))?;
        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
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
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_and_keeps_bounded_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zsfile-otlp.json");
        let writer = RotatingFile::new(path.clone(), 10, 2);

        for i in 0..5 {
            writer.write_line(&format!("line-{i}-padding")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "line-4-padding\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("zsfile-otlp.1.json")).unwrap(),
            "line-3-padding\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("zsfile-otlp.2.json")).unwrap(),
            "line-2-padding\n"
        );
        assert!(!dir.path().join("zsfile-otlp.3.json").exists());
    }

    #[test]
    fn appends_below_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let writer = RotatingFile::new(path.clone(), DEFAULT_MAX_BYTES, DEFAULT_BACKUPS);
        writer.write_line("a").unwrap();
        writer.write_line("b").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
