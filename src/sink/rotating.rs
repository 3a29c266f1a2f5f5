// file: src/sink/rotating.rs
// version: 1.0.0
// guid: e81b4f06-d3c2-4a7e-9b58-0f26a9c4e1d7

//! Size-based rotating file sink
//!
//! The active file lives at the configured path. When the next line would
//! bring it to `max_bytes`, the file is closed, backups shift up by one
//! (`app.log.1` becomes `app.log.2`, and so on, dropping anything past
//! `backup_count`), the active file becomes `app.log.1`, and a fresh file is
//! opened. The check, the rotation and the write all happen under one lock.

use super::Sink;
use crate::format::Formatter;
use crate::record::Record;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Rotating file sink
pub struct RotatingFileSink {
    path: PathBuf,
    max_bytes: u64,
    backup_count: u32,
    formatter: Formatter,
    state: Mutex<FileState>,
}

struct FileState {
    file: Option<File>,
    size: u64,
}

impl RotatingFileSink {
    /// Open (or create) the active file in append mode.
    ///
    /// The parent directory must already exist.
    pub fn open(
        path: impl Into<PathBuf>,
        max_bytes: u64,
        backup_count: u32,
        formatter: Formatter,
    ) -> io::Result<Self> {
        let path = path.into();
        let (file, size) = open_append(&path)?;
        Ok(Self {
            path,
            max_bytes,
            backup_count,
            formatter,
            state: Mutex::new(FileState {
                file: Some(file),
                size,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn backup_count(&self) -> u32 {
        self.backup_count
    }

    /// Path of the numbered backup, e.g. `app.log.2`
    pub fn backup_path(&self, index: u32) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotation_enabled(&self) -> bool {
        self.max_bytes > 0 && self.backup_count > 0
    }

    fn should_rollover(&self, current: u64, incoming: u64) -> bool {
        // An empty file is never rotated, even for an oversized line
        self.rotation_enabled() && current > 0 && current + incoming >= self.max_bytes
    }

    fn rollover(&self, state: &mut FileState) -> io::Result<()> {
        // Open files cannot be renamed on Windows
        state.file = None;

        for index in (1..self.backup_count).rev() {
            let source = self.backup_path(index);
            let target = self.backup_path(index + 1);
            if source.exists() {
                remove_if_exists(&target)?;
                fs::rename(&source, &target)?;
            }
        }

        let first = self.backup_path(1);
        remove_if_exists(&first)?;
        if self.path.exists() {
            fs::rename(&self.path, &first)?;
        }

        let (file, size) = open_append(&self.path)?;
        state.file = Some(file);
        state.size = size;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, FileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for RotatingFileSink {
    fn emit(&self, record: &Record) -> io::Result<()> {
        let mut line = self.formatter.format(record);
        line.push('\n');
        let bytes = line.as_bytes();

        let rotated = {
            let mut state = self.lock();

            // A failed reopen after rotation is retried on the next record
            if state.file.is_none() {
                let (file, size) = open_append(&self.path)?;
                state.file = Some(file);
                state.size = size;
            }

            let rotated = self.should_rollover(state.size, bytes.len() as u64);
            if rotated {
                self.rollover(&mut state)?;
            }

            if let Some(file) = state.file.as_mut() {
                file.write_all(bytes)?;
                file.flush()?;
            }
            state.size += bytes.len() as u64;
            rotated
        };

        if rotated {
            trace!(path = %self.path.display(), backups = self.backup_count, "Rotated log file");
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        match self.lock().file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

fn open_append(path: &Path) -> io::Result<(File, u64)> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let size = file.metadata()?.len();
    Ok((file, size))
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use tempfile::TempDir;

    fn record(message: &str) -> Record {
        let mut record = Record::new(Level::Info, message);
        record.logger = "svc".to_string();
        record
    }

    #[test]
    fn test_appends_to_existing_file() {
        // Arrange
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        fs::write(&path, "earlier\n").unwrap();

        // Act
        let sink = RotatingFileSink::open(&path, 1024, 2, Formatter::Text).unwrap();
        sink.emit(&record("later")).unwrap();

        // Assert
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier\n"));
        assert!(content.ends_with("svc - INFO - later\n"));
    }

    #[test]
    fn test_rotation_keeps_at_most_backup_count_files() {
        // Arrange: each text line is well over 40 bytes, so every record past
        // the first forces a rollover at 100 bytes
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let sink = RotatingFileSink::open(&path, 100, 2, Formatter::Text).unwrap();
        let pad = "x".repeat(40);

        // Act
        for i in 0..6 {
            sink.emit(&record(&format!("{} {}", i, pad))).unwrap();
        }

        // Assert
        assert!(path.exists());
        assert!(sink.backup_path(1).exists());
        assert!(sink.backup_path(2).exists());
        assert!(!sink.backup_path(3).exists());

        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 3);

        // Newest in the active file, oldest retained in the highest backup
        let active = fs::read_to_string(&path).unwrap();
        let first = fs::read_to_string(sink.backup_path(1)).unwrap();
        let second = fs::read_to_string(sink.backup_path(2)).unwrap();
        assert!(active.contains(&format!("5 {}", pad)));
        assert!(first.contains(&format!("4 {}", pad)));
        assert!(second.contains(&format!("3 {}", pad)));
        for discarded in 0..3 {
            let marker = format!("- {} {}", discarded, pad);
            assert!(!active.contains(&marker));
            assert!(!first.contains(&marker));
            assert!(!second.contains(&marker));
        }
    }

    #[test]
    fn test_active_file_stays_under_limit_when_lines_fit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let sink = RotatingFileSink::open(&path, 200, 3, Formatter::Text).unwrap();

        for i in 0..20 {
            sink.emit(&record(&format!("line {}", i))).unwrap();
        }

        assert!(fs::metadata(&path).unwrap().len() < 200);
        assert!(sink.backup_path(1).exists());
        assert!(!sink.backup_path(4).exists());
    }

    #[test]
    fn test_zero_backup_count_never_rotates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let sink = RotatingFileSink::open(&path, 50, 0, Formatter::Text).unwrap();

        for i in 0..5 {
            sink.emit(&record(&format!("line {}", i))).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 5);
        assert!(!sink.backup_path(1).exists());
    }

    #[test]
    fn test_zero_max_bytes_never_rotates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let sink = RotatingFileSink::open(&path, 0, 3, Formatter::Text).unwrap();

        for i in 0..5 {
            sink.emit(&record(&format!("line {}", i))).unwrap();
        }

        assert!(!sink.backup_path(1).exists());
    }

    #[test]
    fn test_writes_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let sink = RotatingFileSink::open(&path, 0, 0, Formatter::Json).unwrap();

        sink.emit(&record("café")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("café"));
    }

    #[test]
    fn test_backup_path_naming() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let sink = RotatingFileSink::open(&path, 10, 5, Formatter::Text).unwrap();

        assert_eq!(sink.backup_path(3), temp_dir.path().join("app.log.3"));
    }
}
