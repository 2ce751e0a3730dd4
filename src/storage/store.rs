//! The in-memory note list backed by a storage slot.
//!
//! [`NoteStore`] is the single owner of saved notes. Its list is ordered most
//! recent first, never holds two notes with the same id, and is rewritten to
//! the slot after every mutation. A mutation whose write fails is rolled back,
//! so the list always matches the last completed write.

use crate::domain::error::Result;
use crate::domain::Note;
use crate::infrastructure::RandomSource;
use crate::storage::backend::NoteStorage;
use std::sync::Arc;

/// Ordered, deduplicated note list with write-through persistence.
pub struct NoteStore {
    storage: Box<dyn NoteStorage>,
    notes: Vec<Note>,
    random: Arc<dyn RandomSource>,
}

impl NoteStore {
    /// Reads persisted notes into a new store.
    ///
    /// Loading fails soft: an unreadable slot is logged and the store starts
    /// empty. Duplicate ids in the slot keep their first (most recent) entry.
    #[must_use]
    pub fn load(storage: Box<dyn NoteStorage>, random: Arc<dyn RandomSource>) -> Self {
        let _span = tracing::debug_span!("note_store_load").entered();

        let loaded = storage.load_notes().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load saved notes, starting with an empty jar");
            Vec::new()
        });

        let mut notes: Vec<Note> = Vec::with_capacity(loaded.len());
        for note in loaded {
            if notes.iter().any(|n| n.id == note.id) {
                tracing::debug!(note_id = %note.id, "skipping duplicate stored note");
                continue;
            }
            notes.push(note);
        }

        tracing::debug!(count = notes.len(), "note store ready");
        Self {
            storage,
            notes,
            random,
        }
    }

    /// Saved notes, most recent first.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.notes.iter().any(|n| n.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Prepends `note` unless a note with the same id is already stored.
    ///
    /// Returns `Ok(true)` when the note was inserted and persisted, `Ok(false)`
    /// for a duplicate (no write happens).
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails; the insertion is undone.
    pub fn append(&mut self, note: Note) -> Result<bool> {
        let _span = tracing::debug_span!("note_store_append", note_id = %note.id).entered();

        if self.contains(&note.id) {
            tracing::debug!("note already stored, skipping");
            return Ok(false);
        }

        self.notes.insert(0, note);
        if let Err(e) = self.persist() {
            self.notes.remove(0);
            return Err(e);
        }

        tracing::debug!(count = self.notes.len(), "note appended");
        Ok(true)
    }

    /// Removes the note with `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails; the note is restored in
    /// its original position.
    pub fn remove(&mut self, id: &str) -> Result<Option<Note>> {
        let _span = tracing::debug_span!("note_store_remove", note_id = %id).entered();

        let Some(position) = self.notes.iter().position(|n| n.id == id) else {
            tracing::debug!("note not found");
            return Ok(None);
        };

        let removed = self.notes.remove(position);
        if let Err(e) = self.persist() {
            self.notes.insert(position, removed);
            return Err(e);
        }

        tracing::debug!(count = self.notes.len(), "note removed");
        Ok(Some(removed))
    }

    /// Returns a uniformly random stored note, or `None` when empty.
    #[must_use]
    pub fn pick_random(&self) -> Option<&Note> {
        if self.notes.is_empty() {
            return None;
        }
        let index = self.random.index(self.notes.len()).min(self.notes.len() - 1);
        self.notes.get(index)
    }

    /// Writes the full list to the slot, overwriting what was there.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails.
    pub fn persist(&mut self) -> Result<()> {
        self.storage.save_notes(&self.notes)
    }
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("notes", &self.notes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JarError;
    use crate::infrastructure::SystemRandom;
    use crate::storage::MemoryStorage;

    struct FailingStorage;

    impl NoteStorage for FailingStorage {
        fn load_notes(&self) -> Result<Vec<Note>> {
            Err(JarError::Storage("unreadable".to_string()))
        }

        fn save_notes(&mut self, _notes: &[Note]) -> Result<()> {
            Err(JarError::Storage("disk full".to_string()))
        }
    }

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            original_text: "o".to_string(),
            transformed_text: "t".to_string(),
            quote: None,
            created_at: 0,
        }
    }

    #[test]
    fn unreadable_slot_starts_empty() {
        let store = NoteStore::load(Box::new(FailingStorage), Arc::new(SystemRandom::new()));
        assert!(store.is_empty());
    }

    #[test]
    fn failed_write_rolls_back_append() {
        let mut store = NoteStore::load(Box::new(FailingStorage), Arc::new(SystemRandom::new()));
        assert!(store.append(note("a")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_ids_in_slot_are_collapsed() {
        let raw = serde_json::to_string(&[note("a"), note("b"), note("a")]).unwrap();
        let store = NoteStore::load(
            Box::new(MemoryStorage::with_contents(raw)),
            Arc::new(SystemRandom::new()),
        );
        let ids: Vec<&str> = store.notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn pick_random_on_empty_is_none() {
        let store = NoteStore::load(Box::new(MemoryStorage::new()), Arc::new(SystemRandom::new()));
        assert!(store.pick_random().is_none());
    }
}
