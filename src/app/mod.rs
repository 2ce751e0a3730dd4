//! Application layer: the view state machine and its scheduler.
//!
//! # Modules
//!
//! - [`modes`]: `Screen` and `TimedStep`
//! - [`state`]: `AppState` and view model computation
//! - [`actions`]: Side effects requested by transitions
//! - [`handler`]: The transition function
//! - [`session`]: Owns state, store and gateway; runs actions as tasks

pub mod actions;
pub mod handler;
pub mod modes;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Screen, TimedStep};
pub use session::Session;
pub use state::AppState;
