//! Screen and timed-step types for the view state machine.
//!
//! Exactly one [`Screen`] is active at a time. HOME is the resting screen;
//! every path through the jar returns to it.
//!
//! ```text
//! HOME ─w─▶ INPUT ─submit─▶ PROCESSING_CRUMPLE ─(Crumple)─▶ PROCESSING_THROW
//!   ▲         │                                                   │
//!   └─cancel──┘                                               (Throw)
//!   ▲                                                              ▼
//!   └──save── RESULT ◀──note ready── TRANSFORMING ◀──open── REVIEW_PROMPT
//!               ▲                       ▲
//!            select                   random
//!               │                       │
//!   HOME ─g─▶ GALLERY ──────────────────┘
//! ```

use std::fmt;

/// The active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// The jar, with the heart that starts a new note.
    #[default]
    Home,
    /// Writing a draft.
    Input,
    /// The draft is being crumpled (cosmetic).
    ProcessingCrumple,
    /// The crumpled draft flies into the jar (cosmetic).
    ProcessingThrow,
    /// Invitation to look at the note again.
    ReviewPrompt,
    /// Waiting for a note to be ready, held for at least the floor duration.
    Transforming,
    /// A single note, either freshly transformed or taken from the jar.
    Result,
    /// All saved notes.
    Gallery,
}

impl Screen {
    /// Upper-case tag used in logs.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Input => "INPUT",
            Self::ProcessingCrumple => "PROCESSING_CRUMPLE",
            Self::ProcessingThrow => "PROCESSING_THROW",
            Self::ReviewPrompt => "REVIEW_PROMPT",
            Self::Transforming => "TRANSFORMING",
            Self::Result => "RESULT",
            Self::Gallery => "GALLERY",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A transition that fires on its own after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimedStep {
    /// PROCESSING_CRUMPLE → PROCESSING_THROW.
    Crumple,
    /// PROCESSING_THROW → REVIEW_PROMPT.
    Throw,
}

impl TimedStep {
    /// Screen the step must start from to take effect.
    #[must_use]
    pub const fn from(self) -> Screen {
        match self {
            Self::Crumple => Screen::ProcessingCrumple,
            Self::Throw => Screen::ProcessingThrow,
        }
    }

    /// Screen the step moves to.
    #[must_use]
    pub const fn to(self) -> Screen {
        match self {
            Self::Crumple => Screen::ProcessingThrow,
            Self::Throw => Screen::ReviewPrompt,
        }
    }

    /// Step that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Crumple => Some(Self::Throw),
            Self::Throw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_steps_chain_into_review_prompt() {
        let mut step = TimedStep::Crumple;
        let mut screen = step.from();
        loop {
            assert_eq!(screen, step.from());
            screen = step.to();
            match step.next() {
                Some(next) => step = next,
                None => break,
            }
        }
        assert_eq!(screen, Screen::ReviewPrompt);
    }

    #[test]
    fn tags_match_state_names() {
        assert_eq!(Screen::ProcessingCrumple.to_string(), "PROCESSING_CRUMPLE");
        assert_eq!(Screen::default(), Screen::Home);
    }
}
