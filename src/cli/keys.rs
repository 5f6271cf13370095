//! Input Events
//!
//! The discrete events the line editor understands, and their translation
//! from crossterm key and mouse events.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// One input event for the line editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Printable character
    Insert(char),
    Enter,
    HistoryPrevious,
    HistoryNext,
    Backspace,
    Delete,
    Tab,
    /// Ctrl+C
    Interrupt,
    CursorLeft,
    CursorRight,
    Home,
    End,
    /// Pointer click at a document offset
    PlaceCursor(usize),
    SelectionStarted,
    SelectionEnded,
    /// Anything else; swallowed
    Ignored,
}

impl InputEvent {
    /// Translate a terminal event. Key releases and resize/focus events
    /// produce `None`.
    pub fn from_terminal_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key_event(key),
            Event::Mouse(mouse) => Self::from_mouse_event(mouse),
            _ => None,
        }
    }

    pub fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let event = match key {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Self::Interrupt,

            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::SHIFT,
                ..
            } => Self::Insert(*c),

            KeyEvent { code, .. } => match code {
                KeyCode::Enter => Self::Enter,
                KeyCode::Up => Self::HistoryPrevious,
                KeyCode::Down => Self::HistoryNext,
                KeyCode::Backspace => Self::Backspace,
                KeyCode::Delete => Self::Delete,
                KeyCode::Tab => Self::Tab,
                KeyCode::Left => Self::CursorLeft,
                KeyCode::Right => Self::CursorRight,
                KeyCode::Home => Self::Home,
                KeyCode::End => Self::End,
                _ => Self::Ignored,
            },
        };
        Some(event)
    }

    pub fn from_mouse_event(mouse: &MouseEvent) -> Option<Self> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Self::SelectionStarted),
            MouseEventKind::Up(MouseButton::Left) => Some(Self::SelectionEnded),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_printable_characters() {
        assert_eq!(
            InputEvent::from_key_event(&key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(InputEvent::Insert('a'))
        );
        assert_eq!(
            InputEvent::from_key_event(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(InputEvent::Insert('A'))
        );
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        assert_eq!(
            InputEvent::from_key_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputEvent::Interrupt)
        );
        assert_eq!(
            InputEvent::from_key_event(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(InputEvent::Ignored)
        );
    }

    #[test]
    fn test_navigation_keys() {
        let cases = [
            (KeyCode::Enter, InputEvent::Enter),
            (KeyCode::Up, InputEvent::HistoryPrevious),
            (KeyCode::Down, InputEvent::HistoryNext),
            (KeyCode::Backspace, InputEvent::Backspace),
            (KeyCode::Tab, InputEvent::Tab),
            (KeyCode::Home, InputEvent::Home),
            (KeyCode::PageUp, InputEvent::Ignored),
        ];
        for (code, expected) in cases {
            assert_eq!(
                InputEvent::from_key_event(&key(code, KeyModifiers::NONE)),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_key_release_is_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(InputEvent::from_key_event(&release), None);
    }

    #[test]
    fn test_mouse_selection() {
        let mouse = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            InputEvent::from_mouse_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(InputEvent::SelectionStarted)
        );
        assert_eq!(
            InputEvent::from_mouse_event(&mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(InputEvent::SelectionEnded)
        );
        assert_eq!(
            InputEvent::from_mouse_event(&mouse(MouseEventKind::ScrollUp)),
            None
        );
    }
}
