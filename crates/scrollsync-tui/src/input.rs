use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    LineDown,
    LineUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    Refresh,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.pending_g {
        return match (key.code, key.modifiers) {
            (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToTop,
            _ => Action::None,
        };
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Line movement
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::LineDown,
        (KeyCode::Down, _) => Action::LineDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::LineUp,
        (KeyCode::Up, _) => Action::LineUp,

        // Page movement
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ScrollPageDown,
        (KeyCode::PageDown, _) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageUp, _) => Action::ScrollPageUp,

        // Jumps
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::PendingG,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), _) => Action::JumpToBottom,
        (KeyCode::End, _) => Action::JumpToBottom,

        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Refresh,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollsync_core::AppConfig;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_basic_bindings() {
        let app = App::new("doc", "text", AppConfig::default());
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE), &app), Action::LineDown);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('d'), KeyModifiers::CONTROL), &app),
            Action::ScrollHalfPageDown
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT), &app), Action::JumpToBottom);
    }

    #[test]
    fn test_gg_sequence() {
        let mut app = App::new("doc", "text", AppConfig::default());
        let first = handle_key_event(key(KeyCode::Char('g'), KeyModifiers::NONE), &app);
        assert_eq!(first, Action::PendingG);

        app.apply(first);
        let second = handle_key_event(key(KeyCode::Char('g'), KeyModifiers::NONE), &app);
        assert_eq!(second, Action::JumpToTop);
    }
}
