//! The session: state machine plus the scheduler that runs its side effects.
//!
//! A [`Session`] owns everything the jar needs at runtime: the UI state, the
//! note store and the transformation gateway. User input enters through
//! [`Session::dispatch`]. The actions it produces run as tasks on the current
//! tokio runtime, and each one reports back as a single [`Event`] that the
//! caller feeds in with [`Session::advance`].
//!
//! All transitions happen on the caller's task, one at a time. The only
//! concurrency is inside a transformation, where the gateway call and the floor
//! timer run side by side (see [`at_least`](crate::infrastructure::at_least)).
//!
//! # Example
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> emotion_jar::Result<()> {
//! use emotion_jar::app::{Event, Screen, Session};
//! use emotion_jar::gateway::{FallbackPool, GeminiRewriter, GeminiSettings, TransformationGateway};
//! use emotion_jar::infrastructure::{Pacing, SystemRandom};
//! use emotion_jar::storage::{MemoryStorage, NoteStore};
//! use std::sync::Arc;
//!
//! let random = Arc::new(SystemRandom::new());
//! let pacing = Pacing::instant();
//! let rewriter = GeminiRewriter::new(GeminiSettings::default()).expect("client");
//! let gateway = TransformationGateway::new(
//!     Arc::new(rewriter),
//!     FallbackPool::new(random.clone()),
//!     pacing.transform_floor,
//! );
//! let store = NoteStore::load(Box::new(MemoryStorage::new()), random);
//! let mut session = Session::new(store, gateway, pacing);
//!
//! session.dispatch(Event::OpenInput)?;
//! session.dispatch(Event::EditDraft("今天很累".to_string()))?;
//! session.dispatch(Event::SubmitDraft)?;
//! session.settle().await?;
//! assert_eq!(session.state().screen, Screen::ReviewPrompt);
//! # Ok(())
//! # }
//! ```

use crate::app::modes::{Screen, TimedStep};
use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::{JarError, Result};
use crate::domain::Note;
use crate::gateway::TransformationGateway;
use crate::infrastructure::{at_least, Pacing};
use crate::storage::NoteStore;
use crate::ui::viewmodel::UIViewModel;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Runtime context of the jar.
pub struct Session {
    state: AppState,
    store: NoteStore,
    gateway: Arc<TransformationGateway>,
    pacing: Pacing,
    tasks: JoinSet<Event>,
}

impl Session {
    /// Creates a session resting on HOME.
    #[must_use]
    pub fn new(store: NoteStore, gateway: TransformationGateway, pacing: Pacing) -> Self {
        Self {
            state: AppState::new(),
            store,
            gateway: Arc::new(gateway),
            pacing,
            tasks: JoinSet::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.state.screen
    }

    #[must_use]
    pub const fn store(&self) -> &NoteStore {
        &self.store
    }

    /// View model of the active screen.
    #[must_use]
    pub fn viewmodel(&self) -> UIViewModel {
        self.state.compute_viewmodel(self.store.notes())
    }

    /// Returns `true` while scheduled work is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Applies an event and schedules the resulting actions.
    ///
    /// Must be called from within a tokio runtime. Returns whether the screen
    /// needs to be redrawn.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from saving a note.
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let (rerender, actions) = handle_event(&mut self.state, &mut self.store, event)?;
        for action in actions {
            self.schedule(action);
        }
        Ok(rerender)
    }

    /// Waits for the next piece of scheduled work to finish and applies it.
    ///
    /// Returns `None` when nothing is scheduled. Cancel safe: dropping the
    /// future before it resolves loses no work.
    pub async fn advance(&mut self) -> Option<Result<bool>> {
        let joined = self.tasks.join_next().await?;
        Some(match joined {
            Ok(event) => self.dispatch(event),
            Err(e) => Err(JarError::Task(e.to_string())),
        })
    }

    /// Runs scheduled work until none is left.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while applying a completion.
    pub async fn settle(&mut self) -> Result<()> {
        while let Some(outcome) = self.advance().await {
            outcome?;
        }
        Ok(())
    }

    fn delay_for(&self, step: TimedStep) -> Duration {
        match step {
            TimedStep::Crumple => self.pacing.crumple,
            TimedStep::Throw => self.pacing.throw,
        }
    }

    fn schedule(&mut self, action: Action) {
        tracing::debug!(action = ?action, "scheduling action");
        match action {
            Action::Schedule(step) => {
                let delay = self.delay_for(step);
                self.tasks.spawn(async move {
                    tokio::time::sleep(delay).await;
                    Event::StepElapsed(step)
                });
            }
            Action::Transform { original_text } => {
                let gateway = Arc::clone(&self.gateway);
                self.tasks.spawn(async move {
                    let transformation = gateway.transform(&original_text).await;
                    Event::NoteReady(Note::new(original_text, transformation))
                });
            }
            Action::Reveal { note } => {
                let floor = self.pacing.transform_floor;
                self.tasks.spawn(async move {
                    let note = at_least(async move { note }, floor).await;
                    Event::NoteReady(note)
                });
            }
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("pacing", &self.pacing)
            .field("pending", &self.tasks.len())
            .finish_non_exhaustive()
    }
}
