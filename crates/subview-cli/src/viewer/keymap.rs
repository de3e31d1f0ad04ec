use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::Command;

/// Map a key press to a viewer command; releases and repeats are ignored.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Up | KeyCode::Char('k') => Command::Up,
        KeyCode::Down | KeyCode::Char('j') => Command::Down,
        KeyCode::Left | KeyCode::Char('h') => Command::FocusLeft,
        KeyCode::Right | KeyCode::Char('l') => Command::FocusRight,
        KeyCode::PageUp => Command::PageUp,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::Home => Command::Top,
        KeyCode::End => Command::Bottom,
        KeyCode::Char('a') => Command::ToggleAutoScroll,
        KeyCode::Char('v') => Command::ToggleFormat,
        KeyCode::Tab => Command::NextSession,
        KeyCode::BackTab => Command::PrevSession,
        _ => return None,
    };
    Some(command)
}
