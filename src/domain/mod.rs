//! Domain layer for the emotion jar.
//!
//! Core types independent of storage, networking or rendering.
//!
//! - [`error`]: Error types and result aliases
//! - [`note`]: The `Note` model and the draft/transformation helpers

pub mod error;
pub mod note;

pub use error::{JarError, Result, RewriteError};
pub use note::{is_submittable, Note, Transformation};
