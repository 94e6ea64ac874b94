//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    LoadMore,
    EditStartDate,
    EditEndDate,
    ResetDates,
    Refresh,
    OpenHelp,
    Cancel,
}

/// Keys while a date field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Input(char),
    Backspace,
    Commit,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('s') => Some(Action::EditStartDate),
        KeyCode::Char('e') => Some(Action::EditEndDate),
        KeyCode::Char('r') => Some(Action::ResetDates),
        KeyCode::Char('m') | KeyCode::PageDown => Some(Action::LoadMore),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        _ => None,
    }
}

pub fn map_edit_key(event: KeyEvent) -> Option<EditAction> {
    match event.code {
        KeyCode::Enter => Some(EditAction::Commit),
        KeyCode::Esc => Some(EditAction::Cancel),
        KeyCode::Backspace => Some(EditAction::Backspace),
        KeyCode::Char(c) if !event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(EditAction::Input(c))
        }
        _ => None,
    }
}
