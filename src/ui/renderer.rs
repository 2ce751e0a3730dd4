//! Top-level rendering coordinator.
//!
//! Turns a [`UIViewModel`] into ANSI-styled text. Every frame clears the
//! terminal and redraws header, body and footer; the renderer keeps no state
//! between frames.
//!
//! # Example
//!
//! ```rust
//! use emotion_jar::app::AppState;
//! use emotion_jar::ui::{render, Theme};
//!
//! let vm = AppState::new().compute_viewmodel(&[]);
//! let mut frame = Vec::new();
//! render(&vm, &Theme::default(), &mut frame)?;
//! assert!(String::from_utf8_lossy(&frame).contains("情绪罐"));
//! # Ok::<(), std::io::Error>(())
//! ```

use std::borrow::Cow;
use std::io::{self, Write};

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DraftInfo, FooterInfo, GalleryItem, HeaderInfo, JarInfo, NoteCard, PromptInfo, ScreenBody,
    UIViewModel, WaitingInfo,
};

const CLEAR_SCREEN: &str = "\u{001b}[2J\u{001b}[H";
const RULE_WIDTH: usize = 36;

/// Drops control characters other than newlines from note and reply text, so
/// stored or upstream strings cannot emit their own escape sequences.
fn printable(text: &str) -> Cow<'_, str> {
    if text.chars().any(|c| c.is_control() && c != '\n') {
        Cow::Owned(text.chars().filter(|&c| !c.is_control() || c == '\n').collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Renders one frame to `out`.
///
/// # Errors
///
/// Returns any error raised while writing to `out`.
pub fn render(vm: &UIViewModel, theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    write!(out, "{CLEAR_SCREEN}")?;
    render_header(&vm.header, theme, out)?;

    match &vm.body {
        ScreenBody::Home(jar) => render_home(jar, theme, out)?,
        ScreenBody::Input(draft) => render_input(draft, theme, out)?,
        ScreenBody::Waiting(waiting) => render_waiting(waiting, theme, out)?,
        ScreenBody::ReviewPrompt(prompt) => render_prompt(prompt, theme, out)?,
        ScreenBody::Result(card) => render_card(card, theme, out)?,
        ScreenBody::Gallery(items) => render_gallery(items, theme, out)?,
    }

    render_footer(&vm.footer, theme, out)?;
    out.flush()
}

fn render_header(header: &HeaderInfo, theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{}{}",
        Theme::fg(&theme.colors.title_fg),
        Theme::bold(),
        header.title,
        Theme::reset()
    )?;
    if let Some(subtitle) = &header.subtitle {
        writeln!(
            out,
            "{}{}{}",
            Theme::fg(&theme.colors.text_dim),
            subtitle,
            Theme::reset()
        )?;
    }
    rule(theme, out)
}

fn render_home(jar: &JarInfo, theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    let c = &theme.colors;
    let lid = if jar.is_shaking { "  ~[____]~" } else { "   [____]" };
    writeln!(out, "{}{lid}{}", Theme::fg(&c.border), Theme::reset())?;
    writeln!(out, "{}   |    |{}", Theme::fg(&c.border), Theme::reset())?;
    writeln!(
        out,
        "{}   | {:>2} |{}",
        Theme::fg(&c.accent_fg),
        jar.note_count,
        Theme::reset()
    )?;
    writeln!(out, "{}   \\____/{}", Theme::fg(&c.border), Theme::reset())?;
    writeln!(out)?;
    writeln!(
        out,
        "{}♥ {}{}",
        Theme::fg(&c.accent_fg),
        jar.heart_label,
        Theme::reset()
    )?;

    for (enabled, label) in [
        (jar.can_open_gallery, "打开看看"),
        (jar.can_open_random, "随机治愈"),
    ] {
        let color = if enabled { &c.text_normal } else { &c.disabled_fg };
        writeln!(out, "{}  {label}{}", Theme::fg(color), Theme::reset())?;
    }
    Ok(())
}

fn render_input(draft: &DraftInfo, theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    let c = &theme.colors;
    if draft.text.is_empty() {
        writeln!(
            out,
            "{}{}{}{}",
            Theme::fg(&c.text_dim),
            Theme::italic(),
            draft.placeholder,
            Theme::reset()
        )?;
    } else {
        writeln!(out, "{}{}{}", Theme::fg(&c.text_normal), printable(&draft.text), Theme::reset())?;
    }

    let button = if draft.can_submit { &c.accent_fg } else { &c.disabled_fg };
    writeln!(out)?;
    writeln!(out, "{}[ 写好了 ]{}", Theme::fg(button), Theme::reset())
}

fn render_waiting(waiting: &WaitingInfo, theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    let c = &theme.colors;
    if let Some(paper) = &waiting.paper_text {
        writeln!(
            out,
            "{}{}{}",
            Theme::fg(&c.text_dim),
            printable(paper),
            Theme::reset()
        )?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "{}{}{}{}",
        Theme::fg(&c.accent_fg),
        Theme::italic(),
        waiting.caption,
        Theme::reset()
    )
}

fn render_prompt(prompt: &PromptInfo, theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    let c = &theme.colors;
    for line in &prompt.lines {
        writeln!(out, "{}{line}{}", Theme::fg(&c.text_normal), Theme::reset())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{}{}[ {} ]{}",
        Theme::fg(&c.accent_fg),
        Theme::bold(),
        prompt.button,
        Theme::reset()
    )
}

fn render_card(card: &NoteCard, theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    let c = &theme.colors;
    writeln!(
        out,
        "{}{}{}{}",
        Theme::fg(&c.text_dim),
        Theme::strikethrough(),
        printable(&card.original_text),
        Theme::reset()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{}{}{}{}",
        Theme::fg(&c.accent_fg),
        Theme::bold(),
        printable(&card.transformed_text),
        Theme::reset()
    )?;
    if let Some(quote) = &card.quote {
        writeln!(
            out,
            "{}{}{}{}",
            Theme::fg(&c.quote_fg),
            Theme::italic(),
            printable(quote),
            Theme::reset()
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{}[ {} ]{}",
        Theme::fg(&c.accent_fg),
        card.confirm_label,
        Theme::reset()
    )
}

fn render_gallery(items: &[GalleryItem], theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    let c = &theme.colors;
    for item in items {
        writeln!(
            out,
            "{}{:>3}.{} {}{}{}",
            Theme::fg(&c.text_dim),
            item.number,
            Theme::reset(),
            Theme::fg(&c.text_normal),
            printable(&item.transformed_text),
            Theme::reset()
        )?;
        if let Some(quote) = &item.quote {
            writeln!(
                out,
                "     {}{}{}",
                Theme::fg(&c.quote_fg),
                printable(quote),
                Theme::reset()
            )?;
        }
        writeln!(
            out,
            "     {}{}{}",
            Theme::fg(&c.text_dim),
            item.created_date,
            Theme::reset()
        )?;
    }
    Ok(())
}

fn render_footer(footer: &FooterInfo, theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    rule(theme, out)?;
    if !footer.keybindings.is_empty() {
        writeln!(
            out,
            "{}{}{}",
            Theme::fg(&theme.colors.text_dim),
            footer.keybindings,
            Theme::reset()
        )?;
    }
    Ok(())
}

fn rule(theme: &Theme, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{}{}{}",
        Theme::fg(&theme.colors.border),
        "─".repeat(RULE_WIDTH),
        Theme::reset()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, Screen};
    use crate::domain::{Note, Transformation};

    fn frame(state: &AppState, notes: &[Note]) -> String {
        let mut out = Vec::new();
        render(&state.compute_viewmodel(notes), &Theme::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn result_frame_shows_all_three_texts() {
        let note = Note::new("今天很累", Transformation::new("我允许自己休息。", "—— 某人"));
        let state = AppState {
            screen: Screen::Result,
            draft: String::new(),
            current_note: Some(note),
        };
        let text = frame(&state, &[]);
        assert!(text.contains("今天很累"));
        assert!(text.contains("我允许自己休息。"));
        assert!(text.contains("—— 某人"));
        assert!(text.contains("收进罐子"));
    }

    #[test]
    fn input_frame_shows_placeholder_when_empty() {
        let state = AppState {
            screen: Screen::Input,
            ..AppState::default()
        };
        assert!(frame(&state, &[]).contains("写下来吧"));
    }

    #[test]
    fn gallery_frame_lists_dates() {
        let note = Note::new("a", Transformation::new("b", "c"));
        let date = note.created_date();
        let state = AppState {
            screen: Screen::Gallery,
            ..AppState::default()
        };
        let text = frame(&state, &[note]);
        assert!(text.contains("1."));
        assert!(text.contains(&date));
    }

    #[test]
    fn control_characters_in_note_text_are_not_emitted() {
        let note = Note::new(
            "累\u{7}",
            Transformation::new("我在\u{1b}]0;title\u{7}呢\n第二行", "\u{1b}[31m—— 某人"),
        );
        let state = AppState {
            screen: Screen::Result,
            draft: String::new(),
            current_note: Some(note.clone()),
        };
        let text = frame(&state, &[]);
        assert!(!text.contains('\u{7}'));
        assert!(!text.contains("\u{1b}]0;"));
        assert!(!text.contains("\u{1b}[31m"));
        assert!(text.contains("我在]0;title呢\n第二行"));

        let gallery = AppState {
            screen: Screen::Gallery,
            ..AppState::default()
        };
        let text = frame(&gallery, &[note]);
        assert!(!text.contains("\u{1b}]0;"));
        assert!(!text.contains("\u{1b}[31m"));
    }

    #[test]
    fn plain_text_is_borrowed_unchanged() {
        assert!(matches!(printable("今天很累\n"), Cow::Borrowed("今天很累\n")));
        assert_eq!(printable("a\tb\u{1b}c"), "abc");
    }
}
