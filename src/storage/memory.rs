//! In-process storage backend.
//!
//! Keeps the serialized slot in memory behind a shared handle. Cloning a
//! [`MemoryStorage`] yields another handle onto the same slot, which lets a
//! test reload a store from what a previous store persisted.

use crate::domain::error::{JarError, Result};
use crate::domain::Note;
use crate::storage::backend::NoteStorage;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot pre-filled with raw contents, decoded on load.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Returns the raw slot contents, if anything was written.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|e| JarError::Storage(format!("memory slot poisoned: {e}")))
    }
}

impl NoteStorage for MemoryStorage {
    fn load_notes(&self) -> Result<Vec<Note>> {
        let slot = self.lock()?;
        match slot.as_deref().map(str::trim) {
            None | Some("") => Ok(Vec::new()),
            Some(raw) => serde_json::from_str::<Option<Vec<Note>>>(raw)
                .map(Option::unwrap_or_default)
                .map_err(|e| JarError::Storage(format!("failed to parse notes JSON: {e}"))),
        }
    }

    fn save_notes(&mut self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string(notes)
            .map_err(|e| JarError::Storage(format!("failed to serialize notes: {e}")))?;
        *self.lock()? = Some(json);
        Ok(())
    }
}
