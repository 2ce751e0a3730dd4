//! Storage layer for saved notes.
//!
//! Notes persist in a single named slot holding a JSON array. The
//! [`NoteStore`] keeps the in-memory list and rewrites the slot after every
//! mutation; the [`NoteStorage`] trait abstracts where the slot lives.
//!
//! # Modules
//!
//! - `backend`: Slot abstraction for backend implementations
//! - `json`: JSON file slot with atomic writes
//! - `memory`: In-process slot for tests and ephemeral runs
//! - `store`: Ordered, deduplicated note list with random pick

pub mod backend;
pub mod json;
pub mod memory;
pub mod store;

pub use backend::NoteStorage;
pub use json::{JsonFileStorage, NOTES_SLOT};
pub use memory::MemoryStorage;
pub use store::NoteStore;
