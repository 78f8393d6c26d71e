//! # Marked text
//!
//! ## Overview
//!
//! While the platform's input method is composing text, it believes that text is provisional and
//! can be edited in place. The editor has no such notion: everything it receives is typed
//! immediately. [MarkedText] tracks what the platform thinks is being composed, and produces the
//! [Keystroke]s that turn the editor's copy of the old composing text into the new one.
//!
//! A correction always takes the same shape:
//!
//! 1. Move right to the end of the previously typed text.
//! 2. Backspace over all of it.
//! 3. Type the new text.
//! 4. Move left until the editor's cursor sits where the platform's caret is.
//!
//! The platform reports lengths and selections in UTF-16 code units, while each key the editor
//! receives crosses or deletes one character, so all counts are converted into characters first.
use crossterm::event::KeyCode;

use crate::key::Keystroke;
use crate::types::util::{utf16_len, utf16_slice, utf16_to_chars};
use crate::types::TextRange;

/// The text currently being composed by the platform's input method.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MarkedText {
    text: String,
    selected: TextRange,
    cancelled: bool,
}

impl MarkedText {
    /// The composing text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Length of the composing text, in UTF-16 code units.
    pub fn len(&self) -> usize {
        utf16_len(&self.text)
    }

    /// The selection within the composing text.
    pub fn selected_range(&self) -> TextRange {
        self.selected
    }

    /// Move the selection, returning the keystrokes that move the editor's cursor to the new
    /// caret.
    pub fn set_selected_range(&mut self, range: TextRange) -> Vec<Keystroke> {
        let mut strokes = vec![];

        let old = utf16_to_chars(&self.text, self.selected.location());
        let new = utf16_to_chars(&self.text, range.location());

        if new > old {
            push_key(&mut strokes, KeyCode::Right, new - old);
        } else {
            push_key(&mut strokes, KeyCode::Left, old - new);
        }

        self.selected = range;

        return strokes;
    }

    /// The range covering all of the composing text.
    pub fn range(&self) -> TextRange {
        TextRange::new(0, self.len())
    }

    /// Get the composing text within `range`.
    pub fn text_in(&self, range: &TextRange) -> Option<&str> {
        utf16_slice(&self.text, range.location(), range.end().offset())
    }

    /// Whether this composition has been abandoned.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Abandon this composition, so that finishing it removes its text from the editor.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Keystrokes that delete the previously typed composing text.
    fn delete_strokes(&self, strokes: &mut Vec<Keystroke>) {
        if self.text.is_empty() {
            return;
        }

        let len = self.text.chars().count();
        let caret = utf16_to_chars(&self.text, self.selected.location());

        push_key(strokes, KeyCode::Right, len - caret);
        push_key(strokes, KeyCode::Backspace, len);
    }

    /// Replace the composing text, returning the keystrokes that bring the editor up to date.
    pub fn update(&mut self, text: &str, selected: TextRange) -> Vec<Keystroke> {
        let mut strokes = vec![];

        self.delete_strokes(&mut strokes);

        if !text.is_empty() {
            strokes.push(Keystroke::Text(text.to_string()));
        }

        let len = text.chars().count();
        let caret = utf16_to_chars(text, selected.location());
        push_key(&mut strokes, KeyCode::Left, len - caret);

        tracing::debug!(
            old = self.text.as_str(),
            new = text,
            location = selected.location(),
            length = selected.len(),
            "updated marked text"
        );

        self.text = text.to_string();
        self.selected = selected;

        return strokes;
    }

    /// End this composition, returning any keystrokes needed to clean up the editor.
    ///
    /// The editor already holds the text of a committed composition, so nothing needs to be
    /// sent unless the composition was cancelled.
    pub fn finish(self) -> Vec<Keystroke> {
        let mut strokes = vec![];

        if self.cancelled {
            tracing::debug!(text = self.text.as_str(), "discarding cancelled marked text");
            self.delete_strokes(&mut strokes);
        } else {
            tracing::debug!(text = self.text.as_str(), "committed marked text");
        }

        return strokes;
    }
}

fn push_key(strokes: &mut Vec<Keystroke>, code: KeyCode, n: usize) {
    if n > 0 {
        strokes.push(Keystroke::Key(code.into(), n));
    }
}
