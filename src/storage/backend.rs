//! Storage backend abstraction.
//!
//! The jar only ever reads the whole list at startup and writes the whole list
//! after a mutation, so the trait is exactly those two operations.

use crate::domain::error::Result;
use crate::domain::Note;

/// A single slot holding the serialized note list.
///
/// # Implementations
///
/// - [`crate::storage::JsonFileStorage`]: JSON file with atomic writes (default)
/// - [`crate::storage::MemoryStorage`]: process memory, shareable between handles
pub trait NoteStorage: Send {
    /// Reads every stored note, most recent first.
    ///
    /// An absent or empty slot yields `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or decoded.
    fn load_notes(&self) -> Result<Vec<Note>>;

    /// Replaces the slot contents with `notes`.
    ///
    /// The write is all-or-nothing: on error the previous contents remain.
    ///
    /// # Errors
    ///
    /// Returns an error if the notes cannot be encoded or written.
    fn save_notes(&mut self, notes: &[Note]) -> Result<()>;
}
