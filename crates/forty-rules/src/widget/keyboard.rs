//! Keyboard input handling and conversion from terminal events.
//!
//! Terminal key events are translated into [`KeyPress`] values so the view
//! models never see `crossterm` types.
//!
//! ```ignore
//! use forty_rules::widget::keyboard::from_crossterm_event;
//!
//! if let Event::Key(event) = crossterm::event::read()? {
//!     if let Some(press) = from_crossterm_event(&event) {
//!         collection.handle_key(press, Instant::now());
//!     }
//! }
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// A printable character, lowercased for letters.
    Char(char),
    /// Anything else.
    Unknown,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardModifiers {
    /// Shift is held.
    pub shift: bool,
    /// Control is held.
    pub control: bool,
    /// Alt/Option is held.
    pub alt: bool,
}

impl KeyboardModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Control only.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: KeyboardModifiers,
}

impl KeyPress {
    /// A press of `key` with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A press of `key` with `modifiers`.
    pub fn with_modifiers(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }

    /// `q` or Ctrl-C.
    pub fn is_quit(&self) -> bool {
        match self.key {
            Key::Char('c') => self.modifiers.control,
            Key::Char('q') => !self.modifiers.control && !self.modifiers.alt,
            _ => false,
        }
    }

    /// Whether this is `ch` with no Control or Alt held.
    pub fn is_char(&self, ch: char) -> bool {
        self.key == Key::Char(ch) && !self.modifiers.control && !self.modifiers.alt
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// Converts a crossterm key code to a [`Key`].
pub fn from_crossterm_key(code: &KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        _ => Key::Unknown,
    }
}

/// Converts crossterm modifier flags.
pub fn from_crossterm_modifiers(modifiers: KeyModifiers) -> KeyboardModifiers {
    KeyboardModifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT),
        control: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
    }
}

/// Converts a crossterm key event. Release events yield `None`.
pub fn from_crossterm_event(event: &KeyEvent) -> Option<KeyPress> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    Some(KeyPress {
        key: from_crossterm_key(&event.code),
        modifiers: from_crossterm_modifiers(event.modifiers),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_conversion() {
        assert_eq!(from_crossterm_key(&KeyCode::Char('S')), Key::Char('s'));
        assert_eq!(from_crossterm_key(&KeyCode::Char(' ')), Key::Space);
        assert_eq!(from_crossterm_key(&KeyCode::F(5)), Key::Unknown);
    }

    #[test]
    fn test_named_key_conversion() {
        assert_eq!(from_crossterm_key(&KeyCode::Esc), Key::Escape);
        assert_eq!(from_crossterm_key(&KeyCode::PageDown), Key::PageDown);
        assert_eq!(from_crossterm_key(&KeyCode::Enter), Key::Enter);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(from_crossterm_event(&event), Some(KeyPress::new(Key::Escape)));

        event.kind = KeyEventKind::Release;
        assert_eq!(from_crossterm_event(&event), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(KeyPress::new(Key::Char('q')).is_quit());
        assert!(KeyPress::with_modifiers(Key::Char('c'), KeyboardModifiers::CONTROL).is_quit());
        assert!(!KeyPress::new(Key::Char('c')).is_quit());
        assert!(!KeyPress::new(Key::Escape).is_quit());
    }
}
