//! Keybinding definitions for the TUI.
//!
//! Mapping is modal: most printable keys feed the focused text field, so
//! only a handful of chords carry actions.

use crate::state::View;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Submit the focused surface: connect in settings, ask in chat.
    Submit,
    ToggleSettings,
    NextField,
    PrevField,
    ScrollUp,
    ScrollDown,
    Insert(char),
    Backspace,
}

pub fn map_key(view: View, event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('s') => Some(Action::ToggleSettings),
            _ => None,
        };
    }

    match code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Tab => Some(Action::NextField),
        KeyCode::BackTab => Some(Action::PrevField),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Up => Some(match view {
            View::Settings => Action::PrevField,
            View::Chat => Action::ScrollUp,
        }),
        KeyCode::Down => Some(match view {
            View::Settings => Action::NextField,
            View::Chat => Action::ScrollDown,
        }),
        KeyCode::Char(c) => Some(Action::Insert(c)),
        _ => None,
    }
}
