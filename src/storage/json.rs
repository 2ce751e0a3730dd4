//! JSON file-based storage backend.
//!
//! Stores the note list as a bare JSON array, the same shape earlier versions
//! of the jar kept in their storage slot. Writes go to a temporary file first
//! and are renamed over the target, so a crash never leaves a half-written
//! list behind.
//!
//! # File Format
//!
//! ```json
//! [
//!   {
//!     "id": "6f1c…",
//!     "originalText": "今天很累",
//!     "transformedText": "今天确实很难熬……",
//!     "quote": "爱自己是终身浪漫的开始。 —— 王尔德",
//!     "createdAt": 1718000000000
//!   }
//! ]
//! ```

use crate::domain::error::{JarError, Result};
use crate::domain::Note;
use crate::storage::backend::NoteStorage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Name of the slot holding saved notes.
pub const NOTES_SLOT: &str = "emotional_jar_notes";

/// JSON file storage backend.
///
/// Every load reads the file and every save rewrites it. A file that exists
/// but cannot be read or decoded is never overwritten: it is moved aside to a
/// uniquely named `.corrupt.<timestamp>` backup, and if even that fails,
/// saving stays disabled for the lifetime of the storage.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
    /// Set when the file on disk holds data this storage could not load.
    write_blocked: Arc<AtomicBool>,
}

impl JsonFileStorage {
    /// Opens the slot at `file_path`, creating parent directories.
    ///
    /// The file itself is not created until the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use emotion_jar::storage::JsonFileStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonFileStorage::new(PathBuf::from("/tmp/jar/notes.json"))?;
    /// # Ok::<(), emotion_jar::JarError>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON note storage");

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            file_path,
            write_blocked: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Opens the default slot file inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be created.
    pub fn in_dir(dir: &Path) -> Result<Self> {
        Self::new(dir.join(format!("{NOTES_SLOT}.json")))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Returns `true` if saving is refused to protect unreadable data.
    #[must_use]
    pub fn is_write_blocked(&self) -> bool {
        self.write_blocked.load(Ordering::Acquire)
    }

    fn block_writes(&self) {
        self.write_blocked.store(true, Ordering::Release);
    }

    /// First free `<file>.corrupt.<unix_millis>[.<n>]` path.
    fn backup_path(&self) -> PathBuf {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let mut attempt = 0_u32;
        loop {
            let mut name = self.file_path.clone().into_os_string();
            if attempt == 0 {
                name.push(format!(".corrupt.{timestamp}"));
            } else {
                name.push(format!(".corrupt.{timestamp}.{attempt}"));
            }
            let candidate = PathBuf::from(name);
            if !candidate.exists() {
                return candidate;
            }
            attempt += 1;
        }
    }

    /// Moves an undecodable file aside so the next save cannot destroy it.
    ///
    /// Blocks further saves if the file cannot be moved.
    fn quarantine(&self) {
        let backup = self.backup_path();
        match std::fs::rename(&self.file_path, &backup) {
            Ok(()) => tracing::warn!(backup = ?backup, "moved unreadable notes file aside"),
            Err(e) => {
                self.block_writes();
                tracing::warn!(error = %e, "could not move unreadable notes file aside, saving disabled");
            }
        }
    }
}

impl NoteStorage for JsonFileStorage {
    fn load_notes(&self) -> Result<Vec<Note>> {
        let _span = tracing::debug_span!("json_load_notes", path = ?self.file_path).entered();

        let bytes = match std::fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no notes file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                self.block_writes();
                tracing::warn!(error = %e, "notes file exists but cannot be read, saving disabled");
                return Err(JarError::Storage(format!("failed to read notes file: {e}")));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Option<Vec<Note>>>(&bytes) {
            Ok(notes) => {
                let notes = notes.unwrap_or_default();
                tracing::debug!(count = notes.len(), "loaded notes");
                Ok(notes)
            }
            Err(e) => {
                self.quarantine();
                Err(JarError::Storage(format!("failed to parse notes JSON: {e}")))
            }
        }
    }

    fn save_notes(&mut self, notes: &[Note]) -> Result<()> {
        let _span = tracing::debug_span!("json_save_notes", count = notes.len()).entered();

        if self.is_write_blocked() {
            return Err(JarError::Storage(
                "notes file could not be loaded, refusing to overwrite it".to_string(),
            ));
        }

        let json = serde_json::to_string_pretty(notes)
            .map_err(|e| JarError::Storage(format!("failed to serialize notes: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("notes saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            original_text: format!("original {id}"),
            transformed_text: format!("transformed {id}"),
            quote: Some("—— 王尔德".to_string()),
            created_at: 1_718_000_000_000,
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path()).unwrap();
        assert!(storage.load_notes().unwrap().is_empty());
    }

    #[test]
    fn empty_and_null_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path()).unwrap();
        std::fs::write(storage.path(), "  \n").unwrap();
        assert!(storage.load_notes().unwrap().is_empty());
        std::fs::write(storage.path(), "null").unwrap();
        assert!(storage.load_notes().unwrap().is_empty());
    }

    #[test]
    fn save_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonFileStorage::in_dir(dir.path()).unwrap();
        storage.save_notes(&[note("a")]).unwrap();
        assert!(storage.path().exists());
        assert!(!storage.path().with_extension("tmp").exists());
    }

    fn backups(storage: &JsonFileStorage) -> Vec<PathBuf> {
        let prefix = format!("{NOTES_SLOT}.json.corrupt.");
        let dir = storage.path().parent().unwrap();
        let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.file_name().unwrap().to_string_lossy().starts_with(&prefix))
            .collect();
        found.sort();
        found
    }

    #[test]
    fn corrupt_file_is_an_error_and_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path()).unwrap();
        std::fs::write(storage.path(), "{not json").unwrap();

        let err = storage.load_notes().unwrap_err();
        assert!(matches!(err, JarError::Storage(_)));
        assert!(!storage.path().exists());

        let moved = backups(&storage);
        assert_eq!(moved.len(), 1);
        assert_eq!(std::fs::read_to_string(&moved[0]).unwrap(), "{not json");
        assert!(!storage.is_write_blocked());
    }

    #[test]
    fn invalid_utf8_is_moved_aside_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path()).unwrap();
        let raw = b"[{\"id\":\"1\",\"originalText\":\"\xff\xfe\"}]".to_vec();
        std::fs::write(storage.path(), &raw).unwrap();

        assert!(matches!(storage.load_notes(), Err(JarError::Storage(_))));

        let moved = backups(&storage);
        assert_eq!(moved.len(), 1);
        assert_eq!(std::fs::read(&moved[0]).unwrap(), raw);
    }

    #[test]
    fn repeated_corruption_keeps_every_backup() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path()).unwrap();

        for contents in ["{ first corrupt", "{ second corrupt"] {
            std::fs::write(storage.path(), contents).unwrap();
            assert!(storage.load_notes().is_err());
        }

        let kept: Vec<String> = backups(&storage)
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect();
        assert_eq!(kept.len(), 2);
        assert!(kept.contains(&"{ first corrupt".to_string()));
        assert!(kept.contains(&"{ second corrupt".to_string()));
    }

    #[test]
    fn unreadable_slot_blocks_saving() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonFileStorage::in_dir(dir.path()).unwrap();
        // A directory in place of the file cannot be read as notes.
        std::fs::create_dir(storage.path()).unwrap();

        assert!(matches!(storage.load_notes(), Err(JarError::Storage(_))));
        assert!(storage.is_write_blocked());
        assert!(matches!(storage.save_notes(&[note("a")]), Err(JarError::Storage(_))));
        assert!(storage.path().is_dir());
    }

    #[test]
    fn reads_array_written_by_earlier_versions() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path()).unwrap();
        std::fs::write(
            storage.path(),
            r#"[{"id":"1718000000000","originalText":"累","transformedText":"我在呢","quote":"q","createdAt":1718000000000}]"#,
        )
        .unwrap();

        let notes = storage.load_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "1718000000000");
        assert_eq!(notes[0].quote.as_deref(), Some("q"));
    }
}
