//! Rotating file writer with size-based rotation and backup retention.
//!
//! [`RotatingLog`] implements [`MakeWriter`], so it plugs straight into a
//! `tracing-subscriber` fmt layer. Each formatted event arrives as a single
//! write and is appended under a lock.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating log file.
///
/// When the file exceeds the size limit it is renamed to
/// `<name>.<unix_timestamp>` and a fresh file is started. Backups beyond the
/// retention limit are removed, oldest first.
///
/// Cloning shares the underlying file handle.
#[derive(Clone)]
pub struct RotatingLog {
    inner: Arc<Inner>,
}

struct Inner {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Lazily opened on first write.
    file: Mutex<Option<File>>,
}

impl RotatingLog {
    /// Creates a log writer for `file_path` with the default limits.
    ///
    /// The file is not opened until the first write.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                file_path,
                max_bytes,
                max_backups,
                file: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.file_path
    }

    /// Appends `buf`, rotating first if the file has grown too large.
    ///
    /// # Errors
    ///
    /// Fails on rotation, open or write errors, or if the lock is poisoned.
    pub fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut file = self
            .inner
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut file)?;

        if file.is_none() {
            let opened = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.inner.file_path)?;
            *file = Some(opened);
        }

        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))?;
        handle.write_all(buf)?;
        handle.flush()
    }

    fn check_and_rotate(&self, file: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.inner.file_path) {
            if metadata.len() > self.inner.max_bytes {
                *file = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let mut backup = self.inner.file_path.clone().into_os_string();
        backup.push(format!(".{timestamp}"));

        if self.inner.file_path.exists() {
            fs::rename(&self.inner.file_path, PathBuf::from(backup))?;
        }

        self.cleanup_old_backups()
    }

    /// Removes backups beyond the retention limit, newest kept.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let path = &self.inner.file_path;
        let parent_dir = path
            .parent()
            .ok_or_else(|| io::Error::other("No parent directory"))?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| io::Error::other("Invalid file name"))?;
        let prefix = format!("{file_name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|name| name.to_str())
                    .and_then(|name| name.strip_prefix(&prefix))
                    .is_some_and(|suffix| suffix.bytes().all(|b| b.is_ascii_digit()))
            })
            .collect();

        // Timestamp suffixes sort chronologically once compared as numbers.
        backups.sort_by_key(|p| {
            std::cmp::Reverse(
                p.extension()
                    .and_then(|e| e.to_str())
                    .and_then(|e| e.parse::<i64>().ok())
                    .unwrap_or_default(),
            )
        });

        for old_backup in backups.iter().skip(self.inner.max_backups) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl std::fmt::Debug for RotatingLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingLog")
            .field("file_path", &self.inner.file_path)
            .finish_non_exhaustive()
    }
}

/// Per-event writer handed out by [`RotatingLog::make_writer`].
pub struct LogWriter<'a> {
    log: &'a RotatingLog,
}

impl Write for LogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.log.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingLog {
    type Writer = LogWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter { log: self }
    }
}
