//! Application state and view model computation.
//!
//! [`AppState`] is the transient UI state of the jar: the active screen, the
//! draft being written and the note on display. Saved notes are not part of it;
//! they live in the [`NoteStore`](crate::storage::NoteStore) and are passed in
//! when a view model is computed.

use super::modes::Screen;
use crate::domain::{is_submittable, Note};
use crate::ui::viewmodel::{
    DraftInfo, FooterInfo, GalleryItem, HeaderInfo, JarInfo, NoteCard, PromptInfo, ScreenBody,
    UIViewModel, WaitingInfo,
};

/// Label of the confirm button for a note not yet in the jar.
pub const SAVE_LABEL: &str = "收进罐子";

/// Label of the confirm button for a note already in the jar.
pub const BACK_HOME_LABEL: &str = "返回首页";

/// Central UI state container.
///
/// Mutated only by [`handle_event`](crate::app::handle_event).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// The active screen.
    pub screen: Screen,

    /// Text being written. Kept across a cancel, cleared on save/close.
    pub draft: String,

    /// Note shown on the result screen.
    pub current_note: Option<Note>,
}

impl AppState {
    /// Creates a state resting on HOME with an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the draft may be submitted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        is_submittable(&self.draft)
    }

    /// Switches to `screen`, logging the transition.
    pub fn enter(&mut self, screen: Screen) {
        tracing::debug!(from = %self.screen, to = %screen, "screen transition");
        self.screen = screen;
    }

    /// Discards the draft and the displayed note and returns to HOME.
    pub fn reset_to_home(&mut self) {
        self.draft.clear();
        self.current_note = None;
        self.enter(Screen::Home);
    }

    /// Computes the renderable view model for the active screen.
    ///
    /// `notes` is the saved list, most recent first.
    #[must_use]
    pub fn compute_viewmodel(&self, notes: &[Note]) -> UIViewModel {
        let has_notes = !notes.is_empty();

        let (header, body, keybindings) = match self.screen {
            Screen::Home => {
                let mut keys = vec!["w 写下来"];
                if has_notes {
                    keys.push("g 打开看看");
                    keys.push("r 随机治愈");
                }
                keys.push("q 离开");
                (
                    header("情绪罐", Some("I am here with you")),
                    ScreenBody::Home(JarInfo {
                        note_count: notes.len(),
                        is_shaking: has_notes,
                        can_open_gallery: has_notes,
                        can_open_random: has_notes,
                        heart_label: "你正在被倾听".to_string(),
                    }),
                    keys.join(" · "),
                )
            }
            Screen::Input => (
                header("倾诉时刻", None),
                ScreenBody::Input(DraftInfo {
                    text: self.draft.clone(),
                    placeholder: "这一刻，你有什么感受和想法？写下来吧，我会接住它们...".to_string(),
                    can_submit: self.can_submit(),
                }),
                "逐行写下 · 空行或 :done 写好了 · :clear 清空 · :back 返回".to_string(),
            ),
            Screen::ProcessingCrumple => (
                header("倾诉时刻", None),
                ScreenBody::Waiting(WaitingInfo {
                    caption: "揉成一团...".to_string(),
                    paper_text: Some(self.draft.clone()),
                }),
                String::new(),
            ),
            Screen::ProcessingThrow => (
                header("倾诉时刻", None),
                ScreenBody::Waiting(WaitingInfo {
                    caption: "正在温柔地收纳...".to_string(),
                    paper_text: None,
                }),
                String::new(),
            ),
            Screen::ReviewPrompt => (
                header("重新审视", None),
                ScreenBody::ReviewPrompt(PromptInfo {
                    title: "重新审视".to_string(),
                    lines: vec![
                        "情绪已安放。".to_string(),
                        "但我想请你再看一眼，".to_string(),
                        "也许在裂痕中，".to_string(),
                        "藏着光的种子。".to_string(),
                    ],
                    button: "展开看看".to_string(),
                }),
                "回车 展开看看".to_string(),
            ),
            Screen::Transforming => (
                header("力量的回响", None),
                ScreenBody::Waiting(WaitingInfo {
                    caption: "正在斟酌温暖的词句...".to_string(),
                    paper_text: None,
                }),
                String::new(),
            ),
            Screen::Result => {
                let card = self.note_card(notes);
                let keys = format!("回车 {}", card.confirm_label);
                (header("力量的回响", None), ScreenBody::Result(card), keys)
            }
            Screen::Gallery => (
                header("我的情绪罐", None),
                ScreenBody::Gallery(
                    notes
                        .iter()
                        .enumerate()
                        .map(|(i, note)| GalleryItem {
                            number: i + 1,
                            transformed_text: note.transformed_text.clone(),
                            quote: note.quote.clone(),
                            created_date: note.created_date(),
                        })
                        .collect(),
                ),
                "数字 查看 · r 随机 · b 返回".to_string(),
            ),
        };

        UIViewModel {
            screen: self.screen,
            header,
            body,
            footer: FooterInfo { keybindings },
        }
    }

    fn note_card(&self, notes: &[Note]) -> NoteCard {
        let Some(note) = &self.current_note else {
            // RESULT is always entered with a note set.
            return NoteCard {
                original_text: self.draft.clone(),
                transformed_text: String::new(),
                quote: None,
                is_saved: false,
                confirm_label: BACK_HOME_LABEL.to_string(),
            };
        };

        let is_saved = notes.iter().any(|n| n.id == note.id);
        NoteCard {
            original_text: note.original_text.clone(),
            transformed_text: note.transformed_text.clone(),
            quote: note.quote.clone(),
            is_saved,
            confirm_label: if is_saved { BACK_HOME_LABEL } else { SAVE_LABEL }.to_string(),
        }
    }
}

fn header(title: &str, subtitle: Option<&str>) -> HeaderInfo {
    HeaderInfo {
        title: title.to_string(),
        subtitle: subtitle.map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transformation;

    #[test]
    fn empty_jar_hides_gallery_and_random() {
        let vm = AppState::new().compute_viewmodel(&[]);
        let ScreenBody::Home(jar) = vm.body else {
            panic!("expected home body");
        };
        assert_eq!(jar.note_count, 0);
        assert!(!jar.is_shaking);
        assert!(!jar.can_open_gallery && !jar.can_open_random);
        assert!(!vm.footer.keybindings.contains("g "));
    }

    #[test]
    fn confirm_label_depends_on_saved_state() {
        let note = Note::new("累", Transformation::new("我在呢", "—— 杨绛"));
        let state = AppState {
            screen: Screen::Result,
            draft: String::new(),
            current_note: Some(note.clone()),
        };

        let ScreenBody::Result(card) = state.compute_viewmodel(&[]).body else {
            panic!("expected result body");
        };
        assert_eq!(card.confirm_label, SAVE_LABEL);
        assert!(!card.is_saved);

        let ScreenBody::Result(card) = state.compute_viewmodel(&[note]).body else {
            panic!("expected result body");
        };
        assert_eq!(card.confirm_label, BACK_HOME_LABEL);
        assert!(card.is_saved);
    }

    #[test]
    fn gallery_numbers_notes_from_one() {
        let notes = vec![
            Note::new("a", Transformation::new("first", "q1")),
            Note::new("b", Transformation::new("second", "q2")),
        ];
        let state = AppState {
            screen: Screen::Gallery,
            ..AppState::default()
        };
        let ScreenBody::Gallery(items) = state.compute_viewmodel(&notes).body else {
            panic!("expected gallery body");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].number, 1);
        assert_eq!(items[1].transformed_text, "second");
    }

    #[test]
    fn reset_discards_draft_and_note() {
        let mut state = AppState {
            screen: Screen::Result,
            draft: "今天很累".to_string(),
            current_note: Some(Note::new("x", Transformation::new("y", "z"))),
        };
        state.reset_to_home();
        assert_eq!(state, AppState::new());
    }
}
