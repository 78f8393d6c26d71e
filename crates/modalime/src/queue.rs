//! # Editor input queues
//!
//! ## Overview
//!
//! The editor on the other side of the bridge accepts input in exactly one way: bytes appended to
//! its input queue. There is no way to take bytes back out, so every correction has to be
//! expressed as more input.
//!
//! Hosts implement [EditorQueue] for their editor. This module also provides two in-memory
//! queues: [RecordingQueue], which keeps the raw bytes it receives, and [LineQueue], which
//! interprets them as a small modal line editor.
use crossterm::event::KeyCode;
use ropey::Rope;

use crate::config::KeyEncodingKind;
use crate::errors::BridgeResult;
use crate::key::EditorKey;

/// The input side of a modal editor.
pub trait EditorQueue {
    /// Append bytes to the editor's input queue.
    fn append(&mut self, bytes: &[u8]);

    /// Whether the editor is in its base mode, where single keys are commands.
    fn is_base_mode(&self) -> bool;

    /// Whether the editor's last command is waiting for a literal character argument.
    fn is_awaiting_char(&self) -> bool {
        false
    }
}

impl<Q: EditorQueue + ?Sized> EditorQueue for &mut Q {
    fn append(&mut self, bytes: &[u8]) {
        (**self).append(bytes)
    }

    fn is_base_mode(&self) -> bool {
        (**self).is_base_mode()
    }

    fn is_awaiting_char(&self) -> bool {
        (**self).is_awaiting_char()
    }
}

/// A queue that records everything appended to it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecordingQueue {
    bytes: Vec<u8>,
    base_mode: bool,
    awaiting: bool,
}

impl RecordingQueue {
    /// Create a queue that reports the given mode.
    pub fn new(base_mode: bool) -> Self {
        RecordingQueue { base_mode, ..Default::default() }
    }

    /// Change the mode this queue reports.
    pub fn set_base_mode(&mut self, base_mode: bool) {
        self.base_mode = base_mode;
    }

    /// Change whether this queue reports waiting for a character.
    pub fn set_awaiting_char(&mut self, awaiting: bool) {
        self.awaiting = awaiting;
    }

    /// Everything appended so far.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Remove and return everything appended so far.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

impl EditorQueue for RecordingQueue {
    fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    fn is_base_mode(&self) -> bool {
        self.base_mode
    }

    fn is_awaiting_char(&self) -> bool {
        self.awaiting
    }
}

/// Modes of the [LineQueue] editor.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LineMode {
    /// Keys are commands.
    #[default]
    Normal,

    /// Keys type text.
    Insert,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
enum CharCommand {
    FindForward,
    FindBackward,
    TillForward,
    TillBackward,
    Replace,
}

/// A single-line modal editor that interprets the bytes appended to it.
///
/// It understands a handful of Vim's Normal mode commands (`i`, `a`, `I`, `A`, `h`, `l`, `x`,
/// `0`, `$`, and the character arguments of `f`, `F`, `t`, `T` and `r`), and in Insert mode
/// types text, deletes with Backspace and moves with the arrow keys. Escape returns to Normal
/// mode, and Enter submits the line.
#[derive(Clone, Debug)]
pub struct LineQueue {
    line: Rope,
    cursor: usize,
    mode: LineMode,
    pending: Option<CharCommand>,
    encoding: KeyEncodingKind,
    submitted: Vec<String>,
}

impl Default for LineQueue {
    fn default() -> Self {
        LineQueue::new(KeyEncodingKind::default())
    }
}

impl LineQueue {
    /// Create an empty line in Normal mode, reading keys in the given encoding.
    pub fn new(encoding: KeyEncodingKind) -> Self {
        LineQueue {
            line: Rope::new(),
            cursor: 0,
            mode: LineMode::Normal,
            pending: None,
            encoding,
            submitted: vec![],
        }
    }

    /// Create an empty line that starts out in Insert mode.
    pub fn insert_mode(encoding: KeyEncodingKind) -> Self {
        LineQueue { mode: LineMode::Insert, ..LineQueue::new(encoding) }
    }

    /// The current contents of the line.
    pub fn line(&self) -> String {
        self.line.to_string()
    }

    /// The cursor position, in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The current mode.
    pub fn mode(&self) -> LineMode {
        self.mode
    }

    /// Lines submitted with Enter.
    pub fn submitted(&self) -> &[String] {
        self.submitted.as_slice()
    }

    /// Decode and process bytes, reporting undecodable input.
    pub fn feed(&mut self, bytes: &[u8]) -> BridgeResult<()> {
        let keys = self.encoding.encoding().decode(bytes)?;

        for key in keys {
            self.key(key);
        }

        Ok(())
    }

    fn len(&self) -> usize {
        self.line.len_chars()
    }

    fn char_at(&self, idx: usize) -> Option<char> {
        if idx < self.len() {
            Some(self.line.char(idx))
        } else {
            None
        }
    }

    fn key(&mut self, key: EditorKey) {
        tracing::trace!(%key, mode = ?self.mode, "line editor key");

        match self.mode {
            LineMode::Normal => self.normal_key(key),
            LineMode::Insert => self.insert_key(key),
        }
    }

    fn normal_max(&self) -> usize {
        self.len().saturating_sub(1)
    }

    fn normal_key(&mut self, key: EditorKey) {
        if let Some(cmd) = self.pending.take() {
            if let Some(c) = key.get_char() {
                self.char_command(cmd, c);
            }

            return;
        }

        match key.code() {
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.normal_max()),
            _ => {},
        }

        let Some(c) = key.get_char() else {
            return;
        };

        match c {
            'i' => self.mode = LineMode::Insert,
            'a' => {
                self.cursor = (self.cursor + 1).min(self.len());
                self.mode = LineMode::Insert;
            },
            'I' => {
                self.cursor = 0;
                self.mode = LineMode::Insert;
            },
            'A' => {
                self.cursor = self.len();
                self.mode = LineMode::Insert;
            },
            'h' => self.cursor = self.cursor.saturating_sub(1),
            'l' => self.cursor = (self.cursor + 1).min(self.normal_max()),
            '0' => self.cursor = 0,
            '$' => self.cursor = self.normal_max(),
            'x' => {
                if self.cursor < self.len() {
                    self.line.remove(self.cursor..self.cursor + 1);
                    self.cursor = self.cursor.min(self.normal_max());
                }
            },
            'f' => self.pending = Some(CharCommand::FindForward),
            'F' => self.pending = Some(CharCommand::FindBackward),
            't' => self.pending = Some(CharCommand::TillForward),
            'T' => self.pending = Some(CharCommand::TillBackward),
            'r' => self.pending = Some(CharCommand::Replace),
            _ => {},
        }
    }

    fn find_forward(&self, c: char) -> Option<usize> {
        (self.cursor + 1..self.len()).find(|&i| self.char_at(i) == Some(c))
    }

    fn find_backward(&self, c: char) -> Option<usize> {
        (0..self.cursor).rev().find(|&i| self.char_at(i) == Some(c))
    }

    fn char_command(&mut self, cmd: CharCommand, c: char) {
        match cmd {
            CharCommand::FindForward => {
                if let Some(idx) = self.find_forward(c) {
                    self.cursor = idx;
                }
            },
            CharCommand::FindBackward => {
                if let Some(idx) = self.find_backward(c) {
                    self.cursor = idx;
                }
            },
            CharCommand::TillForward => {
                if let Some(idx) = self.find_forward(c) {
                    self.cursor = idx - 1;
                }
            },
            CharCommand::TillBackward => {
                if let Some(idx) = self.find_backward(c) {
                    self.cursor = idx + 1;
                }
            },
            CharCommand::Replace => {
                if self.cursor < self.len() {
                    self.line.remove(self.cursor..self.cursor + 1);
                    self.line.insert_char(self.cursor, c);
                }
            },
        }
    }

    fn insert_key(&mut self, key: EditorKey) {
        if let Some(c) = key.get_char() {
            self.line.insert_char(self.cursor, c);
            self.cursor += 1;
            return;
        }

        match key.code() {
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char('h') if key == EditorKey::ctrl('h') => self.backspace(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Delete => {
                if self.cursor < self.len() {
                    self.line.remove(self.cursor..self.cursor + 1);
                }
            },
            KeyCode::Esc => {
                self.mode = LineMode::Normal;
                self.cursor = self.cursor.saturating_sub(1);
            },
            KeyCode::Enter => {
                self.submitted.push(self.line.to_string());
                self.line = Rope::new();
                self.cursor = 0;
            },
            _ => {},
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.line.remove(self.cursor - 1..self.cursor);
            self.cursor -= 1;
        }
    }
}

impl EditorQueue for LineQueue {
    fn append(&mut self, bytes: &[u8]) {
        if let Err(e) = self.feed(bytes) {
            tracing::warn!(error = %e, "dropping undecodable editor input");
        }
    }

    fn is_base_mode(&self) -> bool {
        self.mode == LineMode::Normal
    }

    fn is_awaiting_char(&self) -> bool {
        self.pending.is_some()
    }
}
