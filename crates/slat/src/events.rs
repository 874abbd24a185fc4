//! Input event types consumed by the list surface.
//!
//! This is the subset of pointer/keyboard vocabulary the list core needs.
//! The host windowing collaborator translates its native events into these
//! types, with positions already in surface-local (viewport) coordinates.

use slat_core::Point;

/// State of the keyboard modifier keys during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardModifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub control: bool,
    /// Alt key is held.
    pub alt: bool,
}

impl KeyboardModifiers {
    /// Modifiers with nothing held.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    /// The primary (usually left) button.
    #[default]
    Left,
    /// The secondary (usually right) button.
    Right,
    /// The middle button or wheel press.
    Middle,
}

/// Keys the list surface recognizes.
///
/// Anything else is reported as unhandled so the host's normal key
/// processing takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Tab,
    Home,
    End,
}

/// A pointer press/release/move event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Position relative to the surface's visible origin.
    pub pos: Point,
    /// The button involved (for press/release; `Left` for moves).
    pub button: MouseButton,
    /// Modifier keys held during the event.
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// Create a left-button event at the given position.
    pub fn at(pos: Point) -> Self {
        Self {
            pos,
            button: MouseButton::Left,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// A key press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The recognized key.
    pub key: Key,
    /// Modifier keys held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyEvent {
    /// Create a key event with no modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Create a key event with shift held.
    pub fn shifted(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers {
                shift: true,
                ..KeyboardModifiers::NONE
            },
        }
    }
}
