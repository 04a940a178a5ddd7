//! Backend-neutral input events. The terminal backend translates crossterm
//! events into these; the runtime and its tests only ever see these types.

use std::time::Duration;

/// What the runtime reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(InputEvent),
    /// Left-button press at a terminal cell.
    Click { column: u16, row: u16 },
    /// Terminal size changed; the next frame picks up the new size.
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    #[cfg(test)]
    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            alt: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: KeyCode,
    pub modifiers: Modifiers,
    /// Auto-repeat from a held key.
    pub is_repeat: bool,
}

impl InputEvent {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            is_repeat: false,
        }
    }

    #[cfg(test)]
    pub fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::default())
    }
}

pub trait InputSource {
    /// Next event, waiting at most `timeout`.
    fn poll_event(&mut self, timeout: Duration) -> Option<AppEvent>;
}
