//! # Editor keys
//!
//! ## Overview
//!
//! This module contains code for representing the keys sent to an editor, and for turning them
//! into the bytes that the editor's input queue understands.
//!
//! The editor only has one input primitive, appending bytes, so backspaces and cursor motions are
//! expressed as byte sequences in whichever [KeyEncoding] the editor reads.
//!
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub mod parse;

/// Vim's marker byte for special keys in its input buffer.
pub(crate) const K_SPECIAL: u8 = 0x80;

/// Second and third bytes used to escape a literal [K_SPECIAL] byte.
pub(crate) const KS_SPECIAL: u8 = 0xFE;
pub(crate) const KE_FILLER: u8 = b'X';

/// Errors that occur while decoding bytes sent to an editor.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Literal text that isn't valid UTF-8.
    #[error("Invalid UTF-8 in input: {0:?}")]
    InvalidUtf8(Vec<u8>),

    /// A special key code that isn't recognized.
    #[error("Unknown special key code: {0:#04x} {1:#04x}")]
    UnknownSpecial(u8, u8),
}

/// A key sent to an editor.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EditorKey {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl EditorKey {
    pub(crate) fn new(code: KeyCode, mut modifiers: KeyModifiers) -> Self {
        if let KeyCode::Char(_) = code {
            // The case of the character already carries SHIFT.
            modifiers -= KeyModifiers::SHIFT;
        }

        Self { code, modifiers }
    }

    /// A character typed while holding Control.
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c.to_ascii_lowercase()), KeyModifiers::CONTROL)
    }

    /// The key code.
    pub fn code(&self) -> KeyCode {
        self.code
    }

    /// The modifiers held down with this key.
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Return the character this key types, if it's an unmodified character.
    pub fn get_char(&self) -> Option<char> {
        if let KeyCode::Char(c) = self.code {
            if self.modifiers.is_empty() {
                return Some(c);
            }
        }

        None
    }

    /// Return this key's representation as a single codepoint, if it exists.
    pub fn get_literal_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) => {
                if self.modifiers.is_empty() {
                    return Some(c);
                }

                if self.modifiers == KeyModifiers::CONTROL {
                    return ctrl_code(c).map(char::from);
                }

                return None;
            },
            KeyCode::Tab if self.modifiers.is_empty() => {
                return Some('\u{09}');
            },
            KeyCode::Enter => {
                return Some('\u{0D}');
            },
            KeyCode::Esc => {
                return Some('\u{1B}');
            },
            KeyCode::Backspace => {
                return Some('\u{7F}');
            },
            _ => {
                return None;
            },
        }
    }

    /// Map a control character, such as one decoded from an input stream, back to a key.
    pub fn from_control(c: char) -> Option<Self> {
        let key = match c {
            '\u{09}' => KeyCode::Tab.into(),
            '\u{0D}' => KeyCode::Enter.into(),
            '\u{1B}' => KeyCode::Esc.into(),
            '\u{7F}' => KeyCode::Backspace.into(),
            '\u{00}' => EditorKey::ctrl('@'),
            '\u{01}'..='\u{1A}' => EditorKey::ctrl((c as u8 - 0x01 + b'a') as char),
            '\u{1C}' => EditorKey::ctrl('\\'),
            '\u{1D}' => EditorKey::ctrl(']'),
            '\u{1E}' => EditorKey::ctrl('^'),
            '\u{1F}' => EditorKey::ctrl('_'),
            _ => return None,
        };

        Some(key)
    }
}

/// The control code produced by typing `c` while holding Control.
pub fn ctrl_code(c: char) -> Option<u8> {
    let code = match c.to_ascii_uppercase() {
        '@' | ' ' => 0x00,
        c @ 'A'..='Z' => c as u8 - b'A' + 0x01,
        '[' => 0x1B,
        '\\' | '4' => 0x1C,
        ']' | '5' => 0x1D,
        '^' | '6' => 0x1E,
        '_' | '7' => 0x1F,
        '?' => 0x7F,
        _ => return None,
    };

    Some(code)
}

impl fmt::Display for EditorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctrl = if self.modifiers.contains(KeyModifiers::CONTROL) {
            "C-"
        } else {
            ""
        };

        match self.code {
            KeyCode::Left => write!(f, "<{ctrl}Left>"),
            KeyCode::Right => write!(f, "<{ctrl}Right>"),
            KeyCode::Up => write!(f, "<{ctrl}Up>"),
            KeyCode::Down => write!(f, "<{ctrl}Down>"),
            KeyCode::Home => write!(f, "<{ctrl}Home>"),
            KeyCode::End => write!(f, "<{ctrl}End>"),
            KeyCode::Backspace => write!(f, "<{ctrl}BS>"),
            KeyCode::Delete => write!(f, "<{ctrl}Del>"),
            KeyCode::Enter => write!(f, "<{ctrl}Enter>"),
            KeyCode::Esc => write!(f, "<{ctrl}Esc>"),
            KeyCode::Tab => write!(f, "<{ctrl}Tab>"),
            KeyCode::Char('<') if ctrl.is_empty() => write!(f, "<lt>"),
            KeyCode::Char(c) if ctrl.is_empty() => write!(f, "{c}"),
            KeyCode::Char(c) => write!(f, "<C-{}>", c.to_ascii_uppercase()),
            code => write!(f, "<{code:?}>"),
        }
    }
}

impl From<KeyCode> for EditorKey {
    fn from(code: KeyCode) -> Self {
        EditorKey::new(code, KeyModifiers::NONE)
    }
}

impl From<KeyEvent> for EditorKey {
    fn from(ke: KeyEvent) -> Self {
        EditorKey::new(ke.code, ke.modifiers)
    }
}

impl From<char> for EditorKey {
    fn from(c: char) -> Self {
        EditorKey::from(KeyCode::Char(c))
    }
}

/// A unit of input sent to the editor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Keystroke {
    /// Press a key some number of times.
    Key(EditorKey, usize),

    /// Type literal text.
    Text(String),
}

impl Keystroke {
    /// Press a key once.
    pub fn once(key: impl Into<EditorKey>) -> Self {
        Keystroke::Key(key.into(), 1)
    }

    /// Whether this keystroke would produce no input.
    pub fn is_empty(&self) -> bool {
        match self {
            Keystroke::Key(_, n) => *n == 0,
            Keystroke::Text(s) => s.is_empty(),
        }
    }
}

/// A way of writing keys as the bytes an editor reads from its input queue.
pub trait KeyEncoding: fmt::Debug {
    /// Append the bytes for a single key press to `out`.
    ///
    /// Keys that the encoding can't represent produce nothing.
    fn encode_key(&self, key: &EditorKey, out: &mut Vec<u8>);

    /// Append literal text to `out`.
    fn encode_text(&self, text: &str, out: &mut Vec<u8>);

    /// Decode bytes produced by this encoding back into keys.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<EditorKey>, DecodeError>;

    /// Append a [Keystroke] to `out`.
    fn encode(&self, stroke: &Keystroke, out: &mut Vec<u8>) {
        match stroke {
            Keystroke::Key(key, n) => {
                for _ in 0..*n {
                    self.encode_key(key, out);
                }
            },
            Keystroke::Text(text) => {
                self.encode_text(text, out);
            },
        }
    }
}

fn encode_char(c: char, out: &mut Vec<u8>) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// The byte sequences a VT-style terminal sends.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VtEncoding;

impl KeyEncoding for VtEncoding {
    fn encode_key(&self, key: &EditorKey, out: &mut Vec<u8>) {
        if key.modifiers.contains(KeyModifiers::ALT) {
            out.push(0x1B);
        }

        match key.code {
            KeyCode::Up => out.extend_from_slice(parse::VT_UP),
            KeyCode::Down => out.extend_from_slice(parse::VT_DOWN),
            KeyCode::Right => out.extend_from_slice(parse::VT_RIGHT),
            KeyCode::Left => out.extend_from_slice(parse::VT_LEFT),
            KeyCode::Home => out.extend_from_slice(parse::VT_HOME),
            KeyCode::End => out.extend_from_slice(parse::VT_END),
            KeyCode::Delete => out.extend_from_slice(parse::VT_DELETE),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                encode_char(c, out);
            },
            _ => {
                if let Some(c) = key.get_literal_char() {
                    encode_char(c, out);
                }
            },
        }
    }

    fn encode_text(&self, text: &str, out: &mut Vec<u8>) {
        out.extend_from_slice(text.as_bytes());
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<EditorKey>, DecodeError> {
        parse::decode_vt(bytes)
    }
}

/// The form Vim uses inside of its own input buffer.
///
/// Special keys are written as [K_SPECIAL] followed by a two-byte termcap name, and any literal
/// [K_SPECIAL] bytes inside of text (which show up in multibyte UTF-8 sequences) are escaped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VimEncoding;

impl VimEncoding {
    pub(crate) fn termcap(code: KeyCode) -> Option<[u8; 2]> {
        let name = match code {
            KeyCode::Up => *b"ku",
            KeyCode::Down => *b"kd",
            KeyCode::Left => *b"kl",
            KeyCode::Right => *b"kr",
            KeyCode::Home => *b"kh",
            KeyCode::End => *b"@7",
            KeyCode::Delete => *b"kD",
            KeyCode::Backspace => *b"kb",
            _ => return None,
        };

        Some(name)
    }

    pub(crate) fn from_termcap(name: [u8; 2]) -> Option<KeyCode> {
        let code = match &name {
            b"ku" => KeyCode::Up,
            b"kd" => KeyCode::Down,
            b"kl" => KeyCode::Left,
            b"kr" => KeyCode::Right,
            b"kh" => KeyCode::Home,
            b"@7" => KeyCode::End,
            b"kD" => KeyCode::Delete,
            b"kb" => KeyCode::Backspace,
            _ => return None,
        };

        Some(code)
    }
}

impl KeyEncoding for VimEncoding {
    fn encode_key(&self, key: &EditorKey, out: &mut Vec<u8>) {
        if let Some(name) = VimEncoding::termcap(key.code) {
            out.push(K_SPECIAL);
            out.extend_from_slice(&name);
            return;
        }

        if let Some(c) = key.get_literal_char() {
            let mut buf = [0u8; 4];
            self.encode_text(c.encode_utf8(&mut buf), out);
        }
    }

    fn encode_text(&self, text: &str, out: &mut Vec<u8>) {
        for &b in text.as_bytes() {
            if b == K_SPECIAL {
                out.extend_from_slice(&[K_SPECIAL, KS_SPECIAL, KE_FILLER]);
            } else {
                out.push(b);
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<EditorKey>, DecodeError> {
        parse::decode_vim(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vt(strokes: &[Keystroke]) -> Vec<u8> {
        let mut out = vec![];

        for stroke in strokes {
            VtEncoding.encode(stroke, &mut out);
        }

        out
    }

    fn vim(strokes: &[Keystroke]) -> Vec<u8> {
        let mut out = vec![];

        for stroke in strokes {
            VimEncoding.encode(stroke, &mut out);
        }

        out
    }

    #[test]
    fn test_ctrl_code() {
        assert_eq!(ctrl_code('a'), Some(0x01));
        assert_eq!(ctrl_code('E'), Some(0x05));
        assert_eq!(ctrl_code('z'), Some(0x1A));
        assert_eq!(ctrl_code('['), Some(0x1B));
        assert_eq!(ctrl_code('@'), Some(0x00));
        assert_eq!(ctrl_code('1'), None);
        assert_eq!(ctrl_code('é'), None);
    }

    #[test]
    fn test_from_control() {
        assert_eq!(EditorKey::from_control('\u{05}'), Some(EditorKey::ctrl('e')));
        assert_eq!(EditorKey::from_control('\u{7F}'), Some(KeyCode::Backspace.into()));
        assert_eq!(EditorKey::from_control('\u{0D}'), Some(KeyCode::Enter.into()));
        assert_eq!(EditorKey::from_control('a'), None);
    }

    #[test]
    fn test_shift_stripped() {
        let key = EditorKey::new(KeyCode::Char('F'), KeyModifiers::SHIFT);

        assert_eq!(key, EditorKey::from('F'));
        assert_eq!(key.get_char(), Some('F'));
    }

    #[test]
    fn test_display() {
        assert_eq!(EditorKey::from(KeyCode::Backspace).to_string(), "<BS>");
        assert_eq!(EditorKey::from(KeyCode::Left).to_string(), "<Left>");
        assert_eq!(EditorKey::from('<').to_string(), "<lt>");
        assert_eq!(EditorKey::from('x').to_string(), "x");
        assert_eq!(EditorKey::ctrl('w').to_string(), "<C-W>");
    }

    #[test]
    fn test_vt_encoding() {
        let strokes = [
            Keystroke::Key(KeyCode::Right.into(), 2),
            Keystroke::Key(KeyCode::Backspace.into(), 3),
            Keystroke::Text("かな".into()),
            Keystroke::once(KeyCode::Left),
        ];

        let mut expected = b"\x1b[C\x1b[C\x7f\x7f\x7f".to_vec();
        expected.extend_from_slice("かな".as_bytes());
        expected.extend_from_slice(b"\x1b[D");

        assert_eq!(vt(&strokes), expected);
        assert_eq!(vt(&[Keystroke::once(EditorKey::ctrl('e'))]), vec![0x05]);
        assert_eq!(vt(&[Keystroke::once(KeyCode::Enter)]), vec![0x0D]);
    }

    #[test]
    fn test_vim_encoding() {
        let strokes = [
            Keystroke::Key(KeyCode::Right.into(), 1),
            Keystroke::Key(KeyCode::Backspace.into(), 2),
            Keystroke::once(KeyCode::Left),
        ];

        assert_eq!(vim(&strokes), b"\x80kr\x80kb\x80kb\x80kl".to_vec());

        // "À" is 0xC3 0x80 in UTF-8, and the second byte needs escaping.
        assert_eq!(vim(&[Keystroke::Text("À".into())]), vec![0xC3, 0x80, 0xFE, b'X']);
        assert_eq!(vim(&[Keystroke::Text("ab".into())]), b"ab".to_vec());
    }

    #[test]
    fn test_empty_keystrokes() {
        assert!(Keystroke::Key(KeyCode::Left.into(), 0).is_empty());
        assert!(Keystroke::Text(String::new()).is_empty());
        assert!(!Keystroke::once('x').is_empty());

        assert_eq!(vt(&[Keystroke::Key(KeyCode::Left.into(), 0)]), Vec::<u8>::new());
    }
}
