//! Input event types, decoupled from the backend.
//!
//! Widgets only ever see [`Event`]. The terminal backend converts crossterm
//! events through [`Event::from_crossterm`]; test harnesses build them
//! directly.

use std::ops::{BitAnd, BitOr};

use crate::geometry::{Point, Size};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Ctrl-C, the conventional interrupt.
    pub fn is_interrupt(&self) -> bool {
        self.code == Key::Char('c') && self.modifiers.contains(Modifiers::CTRL)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// One entry of a frame's event batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PointerMove(Point),
    PointerDown(Point),
    PointerUp(Point),
    Resize(Size),
    Key(KeyEvent),
    /// Window close request.
    Quit,
}

impl Event {
    /// The pointer position for pointer events.
    pub fn position(&self) -> Option<Point> {
        match self {
            Event::PointerMove(p) | Event::PointerDown(p) | Event::PointerUp(p) => Some(*p),
            _ => None,
        }
    }

    /// Convert a crossterm event.
    ///
    /// Only the left mouse button produces pointer presses; drags and plain
    /// motion both become [`Event::PointerMove`]. Ctrl-C becomes
    /// [`Event::Quit`]. Returns `None` for events with no counterpart.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Event> {
        use crossterm::event::{MouseButton, MouseEventKind};

        match event {
            crossterm::event::Event::Key(ke) => {
                if ke.kind == crossterm::event::KeyEventKind::Release {
                    return None;
                }
                let key = KeyEvent::from(ke);
                Some(if key.is_interrupt() { Event::Quit } else { Event::Key(key) })
            }
            crossterm::event::Event::Mouse(me) => {
                let p = Point::new(i32::from(me.column), i32::from(me.row));
                match me.kind {
                    MouseEventKind::Down(MouseButton::Left) => Some(Event::PointerDown(p)),
                    MouseEventKind::Up(MouseButton::Left) => Some(Event::PointerUp(p)),
                    MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(Event::PointerMove(p)),
                    _ => None,
                }
            }
            crossterm::event::Event::Resize(w, h) => Some(Event::Resize(Size::new(i32::from(w), i32::from(h)))),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::KeyCode;

        let code = match ct.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            // Unsupported key codes fall back to Escape.
            _ => Key::Escape,
        };
        KeyEvent { code, modifiers: convert_modifiers(ct.modifiers) }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
