//! Keyboard-to-pty byte encoding.
//!
//! The windowing layer receives raw key events; this module maps them to the
//! byte sequences a child shell expects on its pty. Pure data, so the host's
//! key callback reduces to a lookup plus a `write`.

use smallvec::SmallVec;

/// Number of viewport lines scrolled per mouse wheel step.
pub const WHEEL_SCROLL_LINES: i32 = 3;

/// Encoded pty bytes for one key event.
///
/// Every sequence fits inline: the longest specials are 4 bytes
/// (`ESC [ 5 ~`), as is the longest UTF-8 encoding.
pub type KeyBytes = SmallVec<[u8; 4]>;

/// A key event as delivered by the input bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Tab,
    Escape,
    Up,
    Down,
    Right,
    Left,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    /// Printable character input (from the char callback).
    Char(char),
    /// Ctrl held with a letter key.
    Ctrl(char),
}

impl Key {
    /// The bytes to write to the pty for this key.
    ///
    /// Returns an empty sequence for combinations with no pty encoding
    /// (e.g. Ctrl with a non-letter).
    #[must_use]
    pub fn encode(self) -> KeyBytes {
        let mut out = KeyBytes::new();
        match self {
            Self::Enter => out.push(b'\n'),
            Self::Backspace => out.push(0x7F),
            Self::Tab => out.push(b'\t'),
            Self::Escape => out.push(0x1B),
            Self::Up => out.extend_from_slice(b"\x1b[A"),
            Self::Down => out.extend_from_slice(b"\x1b[B"),
            Self::Right => out.extend_from_slice(b"\x1b[C"),
            Self::Left => out.extend_from_slice(b"\x1b[D"),
            Self::Home => out.extend_from_slice(b"\x1b[H"),
            Self::End => out.extend_from_slice(b"\x1b[F"),
            Self::PageUp => out.extend_from_slice(b"\x1b[5~"),
            Self::PageDown => out.extend_from_slice(b"\x1b[6~"),
            Self::Delete => out.extend_from_slice(b"\x1b[3~"),
            Self::Char(ch) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            Self::Ctrl(ch) => {
                if ch.is_ascii_alphabetic() {
                    out.push(ch.to_ascii_uppercase() as u8 - b'A' + 1);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_specials() {
        assert_eq!(Key::Enter.encode().as_slice(), b"\n");
        assert_eq!(Key::Backspace.encode().as_slice(), &[0x7F]);
        assert_eq!(Key::Tab.encode().as_slice(), b"\t");
        assert_eq!(Key::Escape.encode().as_slice(), &[0x1B]);
    }

    #[test]
    fn arrows_are_csi_sequences() {
        assert_eq!(Key::Up.encode().as_slice(), b"\x1b[A");
        assert_eq!(Key::Down.encode().as_slice(), b"\x1b[B");
        assert_eq!(Key::Right.encode().as_slice(), b"\x1b[C");
        assert_eq!(Key::Left.encode().as_slice(), b"\x1b[D");
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(Key::Home.encode().as_slice(), b"\x1b[H");
        assert_eq!(Key::End.encode().as_slice(), b"\x1b[F");
        assert_eq!(Key::PageUp.encode().as_slice(), b"\x1b[5~");
        assert_eq!(Key::PageDown.encode().as_slice(), b"\x1b[6~");
        assert_eq!(Key::Delete.encode().as_slice(), b"\x1b[3~");
    }

    #[test]
    fn ctrl_letters_map_to_control_bytes() {
        assert_eq!(Key::Ctrl('c').encode().as_slice(), &[0x03]);
        assert_eq!(Key::Ctrl('C').encode().as_slice(), &[0x03]);
        assert_eq!(Key::Ctrl('a').encode().as_slice(), &[0x01]);
        assert_eq!(Key::Ctrl('z').encode().as_slice(), &[0x1A]);
    }

    #[test]
    fn ctrl_non_letter_encodes_nothing() {
        assert!(Key::Ctrl('1').encode().is_empty());
        assert!(Key::Ctrl(' ').encode().is_empty());
    }

    #[test]
    fn chars_encode_as_utf8() {
        assert_eq!(Key::Char('a').encode().as_slice(), b"a");
        assert_eq!(Key::Char('é').encode().as_slice(), "é".as_bytes());
        assert_eq!(Key::Char('🎉').encode().as_slice(), "🎉".as_bytes());
    }
}
