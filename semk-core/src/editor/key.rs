//! Decoded keystroke events.

/// A key event as delivered by the keystroke source.
/// Physical key encoding is the source's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable ASCII character.
    Char(u8),
    Backspace,
    Enter,
    Up,
    Down,
    Left,
    Right,
    /// Leave the editor (Ctrl+X).
    ExitRequest,
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Convert an ASCII byte to a key, as a serial or scripted source would.
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            0x18 => Some(Key::ExitRequest), // Ctrl+X
            ch if is_printable(ch) => Some(Key::Char(ch)),
            _ => None,
        }
    }

    /// Keys for every byte of `text`, skipping bytes with no key.
    pub fn from_text(text: &str) -> Vec<Key> {
        text.bytes().filter_map(Key::from_ascii).collect()
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Printable ASCII (space through tilde).
pub fn is_printable(byte: u8) -> bool {
    (0x20..0x7F).contains(&byte)
}
