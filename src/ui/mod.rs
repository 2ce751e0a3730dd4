//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! stdin line → parse_command → Event(s) → Session::dispatch
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Frame rendering
//! - [`input`]: Per-screen line command parsing
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod input;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use input::{parse_command, Command};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{FooterInfo, HeaderInfo, ScreenBody, UIViewModel};
