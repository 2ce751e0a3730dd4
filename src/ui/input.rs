//! Line command parsing.
//!
//! The terminal front end reads one line at a time. What a line means depends
//! on the active screen; [`parse_command`] maps it to the events to dispatch.
//! On INPUT, text lines are added to the draft one by one and an empty line
//! (or `:done`) submits it.

use crate::app::{Event, Screen};
use crate::domain::Note;

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dispatch these events in order.
    Dispatch(Vec<Event>),
    /// Leave the program.
    Quit,
    /// Nothing to do on this screen.
    Ignore,
}

/// Parses a line typed on `screen`.
///
/// `notes` is the saved list in gallery order; gallery numbers index into it.
///
/// # Example
///
/// ```rust
/// use emotion_jar::app::{Event, Screen};
/// use emotion_jar::ui::{parse_command, Command};
///
/// assert_eq!(parse_command(Screen::Home, "w", &[]), Command::Dispatch(vec![Event::OpenInput]));
/// assert_eq!(parse_command(Screen::Home, "q", &[]), Command::Quit);
/// ```
#[must_use]
pub fn parse_command(screen: Screen, line: &str, notes: &[Note]) -> Command {
    let trimmed = line.trim();

    match screen {
        Screen::Home => match trimmed {
            "w" => Command::Dispatch(vec![Event::OpenInput]),
            "g" => Command::Dispatch(vec![Event::OpenGallery]),
            "r" => Command::Dispatch(vec![Event::OpenRandom]),
            "q" => Command::Quit,
            _ => Command::Ignore,
        },
        Screen::Input => match trimmed {
            "" | ":done" => Command::Dispatch(vec![Event::SubmitDraft]),
            ":back" => Command::Dispatch(vec![Event::CancelInput]),
            ":clear" => Command::Dispatch(vec![Event::EditDraft(String::new())]),
            _ => Command::Dispatch(vec![Event::AppendLine(
                line.trim_end_matches(['\r', '\n']).to_string(),
            )]),
        },
        Screen::ReviewPrompt => match trimmed {
            "" | "o" => Command::Dispatch(vec![Event::StartTransformation]),
            _ => Command::Ignore,
        },
        Screen::Result => match trimmed {
            "" | "s" => Command::Dispatch(vec![Event::SaveAndClose]),
            _ => Command::Ignore,
        },
        Screen::Gallery => match trimmed {
            "b" => Command::Dispatch(vec![Event::CloseGallery]),
            "r" => Command::Dispatch(vec![Event::OpenRandom]),
            _ => trimmed
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| notes.get(i))
                .map_or(Command::Ignore, |note| {
                    Command::Dispatch(vec![Event::SelectNote(note.id.clone())])
                }),
        },
        Screen::ProcessingCrumple | Screen::ProcessingThrow | Screen::Transforming => {
            Command::Ignore
        }
    }
}
