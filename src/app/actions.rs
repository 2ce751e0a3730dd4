//! Actions representing side effects to be executed by the session.
//!
//! The event handler stays synchronous and returns a `Vec<Action>`; the
//! [`Session`](crate::app::Session) turns each action into a scheduled task
//! whose completion comes back as an [`Event`](crate::app::Event).

use crate::app::modes::TimedStep;
use crate::domain::Note;

/// Side effects requested by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fire `StepElapsed(step)` after the step's configured delay.
    Schedule(TimedStep),

    /// Run the transformation gateway on `original_text`, then fire
    /// `NoteReady` with a freshly created note.
    Transform {
        /// The submitted draft.
        original_text: String,
    },

    /// Fire `NoteReady(note)` after the transforming floor duration. Used by
    /// the "random" action, which shows a stored note without a new call.
    Reveal {
        /// The stored note to show.
        note: Note,
    },
}
