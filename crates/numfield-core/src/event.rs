//! Canonical input events consumed by numfield widgets.
//!
//! A display layer translates whatever its backend produces into these
//! types. With the `crossterm` feature enabled, [`Event::from_crossterm`]
//! performs that translation for terminal applications.

use bitflags::bitflags;

/// An input event delivered to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press, repeat or release.
    Key(KeyEvent),
    /// Bracketed paste.
    Paste(PasteEvent),
    /// The viewport changed size (columns, rows).
    Resize { width: u16, height: u16 },
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

impl Event {
    /// Convenience constructor for a key press without modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Convenience constructor for a paste event.
    #[must_use]
    pub fn paste(text: impl Into<String>) -> Self {
        Self::Paste(PasteEvent { text: text.into() })
    }
}

/// Key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Backspace,
    Delete,
    Enter,
    Tab,
    BackTab,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Whether the key went down, repeated, or went up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const SUPER = 0b1000;
    }
}

/// A key event with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// Set the modifiers (builder).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the event kind (builder).
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Press or auto-repeat; releases are ignored by text widgets.
    #[must_use]
    pub fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Pasted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub text: String,
}

#[cfg(feature = "crossterm")]
mod crossterm_compat {
    use super::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
    use crossterm::event as ct;

    impl Event {
        /// Translate a crossterm event. Mouse and unsupported keys yield `None`.
        #[must_use]
        pub fn from_crossterm(event: ct::Event) -> Option<Self> {
            match event {
                ct::Event::Key(key) => {
                    let code = match key.code {
                        ct::KeyCode::Char(c) => KeyCode::Char(c),
                        ct::KeyCode::Backspace => KeyCode::Backspace,
                        ct::KeyCode::Delete => KeyCode::Delete,
                        ct::KeyCode::Enter => KeyCode::Enter,
                        ct::KeyCode::Tab => KeyCode::Tab,
                        ct::KeyCode::BackTab => KeyCode::BackTab,
                        ct::KeyCode::Esc => KeyCode::Escape,
                        ct::KeyCode::Left => KeyCode::Left,
                        ct::KeyCode::Right => KeyCode::Right,
                        ct::KeyCode::Up => KeyCode::Up,
                        ct::KeyCode::Down => KeyCode::Down,
                        ct::KeyCode::Home => KeyCode::Home,
                        ct::KeyCode::End => KeyCode::End,
                        _ => return None,
                    };
                    let mut modifiers = Modifiers::empty();
                    if key.modifiers.contains(ct::KeyModifiers::SHIFT) {
                        modifiers |= Modifiers::SHIFT;
                    }
                    if key.modifiers.contains(ct::KeyModifiers::CONTROL) {
                        modifiers |= Modifiers::CTRL;
                    }
                    if key.modifiers.contains(ct::KeyModifiers::ALT) {
                        modifiers |= Modifiers::ALT;
                    }
                    if key.modifiers.contains(ct::KeyModifiers::SUPER) {
                        modifiers |= Modifiers::SUPER;
                    }
                    let kind = match key.kind {
                        ct::KeyEventKind::Press => KeyEventKind::Press,
                        ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                        ct::KeyEventKind::Release => KeyEventKind::Release,
                    };
                    Some(Event::Key(
                        KeyEvent::new(code).with_modifiers(modifiers).with_kind(kind),
                    ))
                }
                ct::Event::Paste(text) => Some(Event::Paste(PasteEvent { text })),
                ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
                ct::Event::FocusGained => Some(Event::Focus(true)),
                ct::Event::FocusLost => Some(Event::Focus(false)),
                _ => None,
            }
        }
    }
}
