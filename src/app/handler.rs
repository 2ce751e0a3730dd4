//! Event handling and state transition logic.
//!
//! [`handle_event`] is the view state machine. It is synchronous and
//! deterministic: given the current state, the note store and an event, it
//! performs the transition and returns the side effects to schedule. Timers and
//! the transformation call never run here; they come back later as events.
//!
//! Events that make no sense on the active screen are ignored. They return
//! `(false, vec![])`: no re-render, nothing scheduled.

use crate::app::modes::{Screen, TimedStep};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Note;
use crate::storage::NoteStore;

/// Events triggered by user input or by completed scheduled work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// HOME → INPUT: the heart was tapped.
    OpenInput,
    /// Replaces the draft text (INPUT only).
    EditDraft(String),
    /// Adds a line to the end of the draft (INPUT only).
    AppendLine(String),
    /// INPUT → PROCESSING_CRUMPLE, if the draft is not blank.
    SubmitDraft,
    /// INPUT → HOME. The draft is kept.
    CancelInput,
    /// A timed step's delay has elapsed.
    StepElapsed(TimedStep),
    /// REVIEW_PROMPT → TRANSFORMING: start the transformation.
    StartTransformation,
    /// TRANSFORMING → RESULT: the note to show is ready.
    NoteReady(Note),
    /// RESULT → HOME, saving the displayed note if it is new.
    SaveAndClose,
    /// HOME → GALLERY, if the jar holds notes.
    OpenGallery,
    /// GALLERY → HOME.
    CloseGallery,
    /// GALLERY → RESULT with the stored note of this id.
    SelectNote(String),
    /// HOME/GALLERY → TRANSFORMING with a random stored note, if any.
    OpenRandom,
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// Returns `(rerender, actions)`.
///
/// # Errors
///
/// Returns the storage error when saving a note fails. The state is left on
/// RESULT with the note still displayed, so the save can be retried.
///
/// # Example
///
/// ```rust
/// use emotion_jar::app::{handle_event, AppState, Event, Screen};
/// use emotion_jar::infrastructure::SystemRandom;
/// use emotion_jar::storage::{MemoryStorage, NoteStore};
/// use std::sync::Arc;
///
/// let mut store = NoteStore::load(Box::new(MemoryStorage::new()), Arc::new(SystemRandom::new()));
/// let mut state = AppState::new();
/// let (rerender, actions) = handle_event(&mut state, &mut store, Event::OpenInput)?;
/// assert!(rerender && actions.is_empty());
/// assert_eq!(state.screen, Screen::Input);
/// # Ok::<(), emotion_jar::JarError>(())
/// ```
pub fn handle_event(
    state: &mut AppState,
    store: &mut NoteStore,
    event: Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", screen = %state.screen, event = ?event).entered();

    match (state.screen, event) {
        (Screen::Home, Event::OpenInput) => {
            state.enter(Screen::Input);
            Ok((true, vec![]))
        }
        (Screen::Input, Event::EditDraft(text)) => {
            state.draft = text;
            Ok((true, vec![]))
        }
        (Screen::Input, Event::AppendLine(line)) => {
            if !state.draft.is_empty() {
                state.draft.push('\n');
            }
            state.draft.push_str(&line);
            Ok((true, vec![]))
        }
        (Screen::Input, Event::SubmitDraft) => {
            if !state.can_submit() {
                tracing::debug!("blank draft, submit ignored");
                return Ok((false, vec![]));
            }
            state.enter(Screen::ProcessingCrumple);
            Ok((true, vec![Action::Schedule(TimedStep::Crumple)]))
        }
        (Screen::Input, Event::CancelInput) => {
            state.enter(Screen::Home);
            Ok((true, vec![]))
        }
        (screen, Event::StepElapsed(step)) if screen == step.from() => {
            state.enter(step.to());
            let actions = step.next().map(Action::Schedule).into_iter().collect();
            Ok((true, actions))
        }
        (Screen::ReviewPrompt, Event::StartTransformation) => {
            state.enter(Screen::Transforming);
            Ok((
                true,
                vec![Action::Transform {
                    original_text: state.draft.clone(),
                }],
            ))
        }
        (Screen::Transforming, Event::NoteReady(note)) => {
            tracing::debug!(note_id = %note.id, "note ready");
            state.current_note = Some(note);
            state.enter(Screen::Result);
            Ok((true, vec![]))
        }
        (Screen::Result, Event::SaveAndClose) => {
            if let Some(note) = &state.current_note {
                let inserted = store.append(note.clone())?;
                tracing::debug!(note_id = %note.id, inserted, "note closed");
            }
            state.reset_to_home();
            Ok((true, vec![]))
        }
        (Screen::Home, Event::OpenGallery) => {
            if store.is_empty() {
                tracing::debug!("jar is empty, gallery refused");
                return Ok((false, vec![]));
            }
            state.enter(Screen::Gallery);
            Ok((true, vec![]))
        }
        (Screen::Gallery, Event::CloseGallery) => {
            state.enter(Screen::Home);
            Ok((true, vec![]))
        }
        (Screen::Gallery, Event::SelectNote(id)) => {
            let Some(note) = store.get(&id) else {
                tracing::debug!(note_id = %id, "selected note not found");
                return Ok((false, vec![]));
            };
            state.current_note = Some(note.clone());
            state.enter(Screen::Result);
            Ok((true, vec![]))
        }
        (Screen::Home | Screen::Gallery, Event::OpenRandom) => {
            let Some(note) = store.pick_random() else {
                tracing::debug!("jar is empty, random refused");
                return Ok((false, vec![]));
            };
            let note = note.clone();
            tracing::debug!(note_id = %note.id, "random note drawn");
            state.enter(Screen::Transforming);
            Ok((true, vec![Action::Reveal { note }]))
        }
        (screen, event) => {
            tracing::trace!(screen = %screen, event = ?event, "event ignored on this screen");
            Ok((false, vec![]))
        }
    }
}
