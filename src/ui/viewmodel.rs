//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no logic, only display-ready strings and flags.

use crate::app::Screen;

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Screen the frame belongs to.
    pub screen: Screen,

    /// Header information (title, subtitle).
    pub header: HeaderInfo,

    /// Screen-specific content.
    pub body: ScreenBody,

    /// Footer information (available commands).
    pub footer: FooterInfo,
}

/// Screen-specific content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenBody {
    Home(JarInfo),
    Input(DraftInfo),
    /// Crumple, throw and transforming phases: a caption over an animation.
    Waiting(WaitingInfo),
    ReviewPrompt(PromptInfo),
    Result(NoteCard),
    Gallery(Vec<GalleryItem>),
}

/// The jar on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarInfo {
    pub note_count: usize,
    /// The jar wobbles while it holds notes.
    pub is_shaking: bool,
    pub can_open_gallery: bool,
    pub can_open_random: bool,
    pub heart_label: String,
}

/// The draft being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftInfo {
    pub text: String,
    pub placeholder: String,
    pub can_submit: bool,
}

/// Caption shown during a timed phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingInfo {
    pub caption: String,
    /// Text shown fading on the crumpling paper, if any.
    pub paper_text: Option<String>,
}

/// The review invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    pub title: String,
    pub lines: Vec<String>,
    pub button: String,
}

/// A single note, as shown on the result screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub original_text: String,
    pub transformed_text: String,
    pub quote: Option<String>,
    /// Whether the note is already in the jar.
    pub is_saved: bool,
    /// Label of the confirm button ("put in jar" or "back home").
    pub confirm_label: String,
}

/// One entry in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    /// 1-based position, also the selection command.
    pub number: usize,
    pub transformed_text: String,
    pub quote: Option<String>,
    pub created_date: String,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text (e.g., "w 写下来 · q 离开").
    pub keybindings: String,
}
