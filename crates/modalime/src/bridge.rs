//! # Input bridge
//!
//! ## Overview
//!
//! [InputBridge] is the object the platform's text-input system talks to. It pretends to be an
//! addressable text buffer, but the only text it holds is the composition in progress. Every
//! edit the platform makes is turned into keys and appended to the editor's [EditorQueue].
//!
//! Input takes one of three routes:
//!
//! * When the editor is in its base mode and nothing is being composed, text is sent straight
//!   through, so that single-key commands like `j` or `dd` never wait on the input method.
//! * When the previous key was an operator like `f` that takes a literal character argument, the
//!   next text is likewise sent straight through.
//! * Otherwise, text is tracked as [MarkedText], and every change to it is reconciled against
//!   what has already been typed into the editor.
//!
//! ## Example
//!
//! ```
//! use modalime::bridge::InputBridge;
//! use modalime::config::BridgeConfig;
//! use modalime::queue::LineQueue;
//! use modalime::types::TextRange;
//!
//! let mut bridge = InputBridge::new(LineQueue::default(), BridgeConfig::default());
//! bridge.mark_flushed();
//! bridge.run_deferred();
//!
//! // In Normal mode, "i" is sent directly as a command.
//! bridge.set_marked_text("i", TextRange::new(1, 0));
//!
//! // In Insert mode, the input method composes "日本".
//! bridge.set_marked_text("に", TextRange::new(1, 0));
//! bridge.set_marked_text("日本", TextRange::new(2, 0));
//! bridge.unmark_text();
//!
//! assert_eq!(bridge.queue().line(), "日本");
//! ```
use std::cmp::Ordering;

use crossterm::event::KeyCode;

use crate::composition::MarkedText;
use crate::config::BridgeConfig;
use crate::errors::BridgeResult;
use crate::focus::{DeferredTask, Focus};
use crate::gate::OperatorGate;
use crate::key::{ctrl_code, EditorKey, KeyEncoding, Keystroke};
use crate::queue::EditorQueue;
use crate::types::{LayoutDirection, TextPosition, TextRange, WritingDirection};

/// Connects a platform's text-input system to a modal editor's input queue.
#[derive(Debug)]
pub struct InputBridge<Q: EditorQueue> {
    queue: Q,
    config: BridgeConfig,
    encoding: &'static dyn KeyEncoding,
    marked: Option<MarkedText>,
    gate: OperatorGate,
    focus: Focus,
    ctrl_latch: bool,
}

impl<Q: EditorQueue> InputBridge<Q> {
    /// Create a bridge that writes into `queue`.
    pub fn new(queue: Q, config: BridgeConfig) -> Self {
        let encoding = config.encoding().encoding();

        InputBridge {
            queue,
            config,
            encoding,
            marked: None,
            gate: OperatorGate::default(),
            focus: Focus::default(),
            ctrl_latch: false,
        }
    }

    /// The editor's input queue.
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Mutable access to the editor's input queue.
    pub fn queue_mut(&mut self) -> &mut Q {
        &mut self.queue
    }

    /// Take the editor's input queue back out of the bridge.
    pub fn into_queue(self) -> Q {
        self.queue
    }

    /// The bridge's configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Replace the operator characters with those in `s`, such as `"fFtTr"`.
    pub fn set_operators(&mut self, s: &str) -> BridgeResult<()> {
        self.config.operators = BridgeConfig::operators_from_str(s)?;

        Ok(())
    }

    /// The composition in progress, if there is one.
    pub fn marked_text(&self) -> Option<&MarkedText> {
        self.marked.as_ref()
    }

    /// Whether text is currently being composed.
    pub fn is_composing(&self) -> bool {
        self.marked.is_some()
    }

    /// Whether the next text will be sent directly as an operator's argument.
    pub fn is_operator_pending(&self) -> bool {
        self.gate.is_pending()
    }

    fn emit(&mut self, strokes: &[Keystroke]) {
        let mut bytes = vec![];

        for stroke in strokes.iter().filter(|stroke| !stroke.is_empty()) {
            self.encoding.encode(stroke, &mut bytes);
        }

        if bytes.is_empty() {
            return;
        }

        tracing::trace!(len = bytes.len(), ?strokes, "appending to editor input");
        self.queue.append(&bytes);
    }

    /// Turn typed text into what should actually be sent.
    ///
    /// A latched Control key turns the text into a control character, and a newline becomes a
    /// carriage return.
    fn escape_text(&mut self, text: &str) -> Option<Keystroke> {
        if self.ctrl_latch {
            self.ctrl_latch = false;

            let upper = text.to_uppercase();
            let mut chars = upper.chars();

            return match (chars.next(), chars.next()) {
                (Some(c), None) if ctrl_code(c).is_some() => Keystroke::once(EditorKey::ctrl(c)).into(),
                _ => {
                    tracing::debug!(text, "no control character for text");
                    None
                },
            };
        }

        if text == "\n" && self.config.newline_as_enter {
            return Keystroke::once(KeyCode::Enter).into();
        }

        return Keystroke::Text(text.to_string()).into();
    }

    /// Send text straight to the editor, returning what was actually sent.
    fn forward(&mut self, text: &str) -> Option<Keystroke> {
        let stroke = self.escape_text(text)?;
        self.emit(std::slice::from_ref(&stroke));

        return Some(stroke);
    }

    /*
     * Keyboard input
     */

    /// Whether there is text to delete. The editor's buffer is hidden, so this is always true.
    pub fn has_text(&self) -> bool {
        true
    }

    /// Type committed text, such as a key on the on-screen keyboard.
    ///
    /// This consumes a pending operator, since the editor takes the text as its argument.
    pub fn insert_text(&mut self, text: &str) {
        self.forward(text);
        self.gate.clear();
    }

    /// Delete the character before the editor's cursor.
    ///
    /// A pending operator is abandoned, just as the editor abandons it on Backspace.
    pub fn delete_backward(&mut self) {
        self.emit(&[Keystroke::once(KeyCode::Backspace)]);
        self.gate.clear();
    }

    /// Latch or release the on-screen Control key.
    ///
    /// A latched Control key applies to the next text that gets sent, and then releases.
    pub fn set_ctrl_latch(&mut self, latched: bool) {
        self.ctrl_latch = latched;
    }

    /// Whether the on-screen Control key is latched.
    pub fn ctrl_latched(&self) -> bool {
        self.ctrl_latch
    }

    /*
     * Marked text
     */

    /// Handle the platform setting or changing the composing text.
    pub fn set_marked_text(&mut self, text: &str, selected: TextRange) {
        if self.gate.is_pending() {
            if text.is_empty() {
                return;
            }

            tracing::debug!(text, "sending operator argument");
            self.forward(text);
            self.gate.clear();
            self.reset_focus();
            return;
        }

        if self.marked.is_none() && self.queue.is_base_mode() {
            if text.is_empty() {
                return;
            }

            tracing::debug!(text, "sending base mode command");
            let sent = self.forward(text);
            self.reset_focus();

            // Only literal text can be an operator. Control keys are never one.
            let literal = match &sent {
                Some(Keystroke::Text(sent)) => sent.as_str(),
                _ => "",
            };

            let awaiting = self.queue.is_awaiting_char();
            self.gate.observe(literal, &self.config, awaiting);
            return;
        }

        if self.marked.is_none() {
            tracing::debug!("starting composition");
            self.acquire_focus();
        }

        let strokes = self.marked.get_or_insert_with(MarkedText::default).update(text, selected);
        self.emit(&strokes);
    }

    /// Handle the platform ending the composition.
    ///
    /// Committed text is already in the editor. A cancelled composition is deleted from it.
    pub fn unmark_text(&mut self) {
        let Some(marked) = self.marked.take() else {
            return;
        };

        let strokes = marked.finish();
        self.emit(&strokes);
    }

    /// Abandon the current composition.
    ///
    /// This resets focus, which makes the platform drop its own composition and commit ours,
    /// removing its text from the editor.
    pub fn cancel_marked_text(&mut self) {
        if let Some(marked) = self.marked.as_mut() {
            tracing::debug!(text = marked.text(), "cancelling composition");
            marked.cancel();
        }

        self.reset_focus();
    }

    /// The selection within the composing text.
    pub fn selected_range(&self) -> Option<TextRange> {
        self.marked.as_ref().map(MarkedText::selected_range)
    }

    /// Move the selection within the composing text, moving the editor's cursor along with the
    /// caret. This does nothing without a composition.
    pub fn set_selected_range(&mut self, range: TextRange) {
        if let Some(marked) = self.marked.as_mut() {
            let strokes = marked.set_selected_range(range);
            self.emit(&strokes);
        }
    }

    /// The range covering the composing text.
    pub fn marked_range(&self) -> Option<TextRange> {
        self.marked.as_ref().map(MarkedText::range)
    }

    /// The composing text within `range`.
    pub fn text_in(&self, range: TextRange) -> Option<String> {
        self.marked.as_ref()?.text_in(&range).map(str::to_string)
    }

    /// Replace text within a range.
    ///
    /// All edits reach the editor as typed keys and backspaces, so direct replacement is never
    /// performed.
    pub fn replace(&mut self, range: TextRange, text: &str) {
        tracing::trace!(?range, text, "ignoring replace request");
    }

    /// Styling for the composing text. The editor draws it, so there is none.
    pub fn marked_text_style(&self) -> Option<()> {
        None
    }

    /*
     * Focus
     */

    /// Whether the bridge holds input focus.
    pub fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    /// Take input focus, if the view has been drawn.
    pub fn acquire_focus(&mut self) -> bool {
        self.focus.acquire()
    }

    /// Give up input focus, committing any composition.
    pub fn resign_focus(&mut self) {
        self.focus.resign();
        self.unmark_text();

        if self.gate.clear() {
            tracing::debug!("operator no longer pending");
        }
    }

    /// Drop and then regain focus, forcing the platform to start over.
    ///
    /// Focus is regained on the host's next turn through [InputBridge::run_deferred].
    pub fn reset_focus(&mut self) {
        tracing::debug!("resetting focus");
        self.resign_focus();
        self.focus.schedule(DeferredTask::AcquireFocus);
    }

    /// Record that the view has been drawn, which allows focus to be taken.
    pub fn mark_flushed(&mut self) {
        self.focus.mark_flushed();
    }

    /// The task waiting for the host's next event loop turn.
    pub fn deferred(&self) -> Option<DeferredTask> {
        self.focus.deferred()
    }

    /// Run the deferred task, if there is one, returning it.
    pub fn run_deferred(&mut self) -> Option<DeferredTask> {
        let task = self.focus.take_deferred()?;

        match task {
            DeferredTask::AcquireFocus => {
                self.acquire_focus();
            },
        }

        return Some(task);
    }

    /*
     * Positions and ranges
     */

    fn current_len(&self) -> usize {
        self.marked.as_ref().map(MarkedText::len).unwrap_or(0)
    }

    /// The position at the start of the composing text.
    pub fn beginning_of_document(&self) -> TextPosition {
        TextPosition::new(0)
    }

    /// The position at the end of the composing text.
    pub fn end_of_document(&self) -> TextPosition {
        TextPosition::new(self.current_len())
    }

    /// Move a position by `offset`, if the result is still within the composing text.
    pub fn position_from(&self, position: TextPosition, offset: isize) -> Option<TextPosition> {
        position.shifted(offset, self.current_len())
    }

    /// Move a position in a layout direction.
    ///
    /// Leftwards and upwards directions take `offset` as given, while rightwards and downwards
    /// directions negate it.
    pub fn position_in_direction(
        &self,
        position: TextPosition,
        dir: LayoutDirection,
        offset: isize,
    ) -> Option<TextPosition> {
        let offset = if dir.is_backward() { Some(offset) } else { offset.checked_neg() };

        self.position_from(position, offset?)
    }

    /// Compare two positions.
    pub fn compare(&self, a: TextPosition, b: TextPosition) -> Ordering {
        a.cmp(&b)
    }

    /// The signed distance between two positions.
    pub fn offset_between(&self, from: TextPosition, to: TextPosition) -> isize {
        from.distance_to(&to)
    }

    /// The range between two positions, in whichever order they're given.
    pub fn text_range(&self, from: TextPosition, to: TextPosition) -> TextRange {
        TextRange::between(from, to)
    }

    /// The edge of `range` farthest in the given direction.
    pub fn position_within(&self, range: TextRange, dir: LayoutDirection) -> TextPosition {
        range.farthest(dir)
    }

    /// A one-character range next to `position` in the given direction.
    pub fn character_range_by_extending(
        &self,
        position: TextPosition,
        dir: LayoutDirection,
    ) -> Option<TextRange> {
        TextRange::extending(position, dir)
    }

    /// The writing direction at a position. The composing text is always left-to-right.
    pub fn base_writing_direction(&self, _: TextPosition) -> WritingDirection {
        WritingDirection::LeftToRight
    }

    /// Change the writing direction of a range. The editor lays out its own text, so this does
    /// nothing.
    pub fn set_base_writing_direction(&mut self, dir: WritingDirection, range: TextRange) {
        tracing::trace!(?dir, ?range, "ignoring writing direction change");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyEncodingKind;
    use crate::queue::{LineMode, LineQueue, RecordingQueue};

    fn bridge<Q: EditorQueue>(queue: Q) -> InputBridge<Q> {
        let mut bridge = InputBridge::new(queue, BridgeConfig::default());
        bridge.mark_flushed();
        bridge.run_deferred();
        bridge
    }

    fn insert_bridge() -> InputBridge<LineQueue> {
        bridge(LineQueue::insert_mode(KeyEncodingKind::Vt))
    }

    #[test]
    fn test_compose_and_commit() {
        let mut bridge = insert_bridge();

        bridge.set_marked_text("h", TextRange::new(0, 1));
        assert!(bridge.is_composing());
        assert_eq!(bridge.queue().line(), "h");
        assert_eq!(bridge.queue().cursor(), 0);

        bridge.set_marked_text("he", TextRange::new(1, 1));
        assert_eq!(bridge.queue().line(), "he");
        assert_eq!(bridge.queue().cursor(), 1);

        bridge.unmark_text();
        assert!(!bridge.is_composing());
        assert_eq!(bridge.queue().line(), "he");
        assert_eq!(bridge.queue().cursor(), 1);
    }

    #[test]
    fn test_compose_after_existing_text() {
        let mut bridge = insert_bridge();
        bridge.insert_text("> ");

        bridge.set_marked_text("k", TextRange::new(1, 0));
        bridge.set_marked_text("か", TextRange::new(1, 0));
        bridge.set_marked_text("かn", TextRange::new(2, 0));
        bridge.set_marked_text("かん", TextRange::new(2, 0));
        bridge.set_marked_text("漢", TextRange::new(1, 0));
        bridge.unmark_text();

        assert_eq!(bridge.queue().line(), "> 漢");
        assert_eq!(bridge.queue().cursor(), 3);
    }

    #[test]
    fn test_cancel_removes_text() {
        let mut bridge = insert_bridge();
        bridge.insert_text("x");

        bridge.set_marked_text("abc", TextRange::new(3, 0));
        assert_eq!(bridge.queue().line(), "xabc");

        bridge.cancel_marked_text();
        assert!(!bridge.is_composing());
        assert_eq!(bridge.queue().line(), "x");
        assert_eq!(bridge.queue().cursor(), 1);

        // Focus comes back on the next turn.
        assert!(!bridge.is_focused());
        assert_eq!(bridge.run_deferred(), Some(DeferredTask::AcquireFocus));
        assert!(bridge.is_focused());
    }

    #[test]
    fn test_cancel_with_caret_inside() {
        let mut bridge = insert_bridge();

        bridge.set_marked_text("abc", TextRange::new(1, 0));
        assert_eq!(bridge.queue().cursor(), 1);

        bridge.cancel_marked_text();
        assert_eq!(bridge.queue().line(), "");
    }

    #[test]
    fn test_normal_mode_commands_bypass_composition() {
        let mut bridge = bridge(RecordingQueue::new(true));

        bridge.set_marked_text("j", TextRange::new(1, 0));
        assert!(!bridge.is_composing());
        assert!(!bridge.is_operator_pending());
        assert_eq!(bridge.queue().bytes(), b"j");

        // Sending a command resets focus, so the platform forgets the character.
        assert_eq!(bridge.deferred(), Some(DeferredTask::AcquireFocus));
    }

    #[test]
    fn test_operator_pending() {
        let mut bridge = bridge(RecordingQueue::new(true));

        bridge.set_marked_text("f", TextRange::new(1, 0));
        assert!(bridge.is_operator_pending());

        // The argument goes straight through, even if the editor has left its base mode.
        bridge.queue_mut().set_base_mode(false);
        bridge.set_marked_text("x", TextRange::new(1, 0));

        assert!(!bridge.is_composing());
        assert!(!bridge.is_operator_pending());
        assert_eq!(bridge.queue().bytes(), b"fx");
    }

    #[test]
    fn test_operator_pending_empty_text() {
        let mut bridge = bridge(RecordingQueue::new(true));

        bridge.set_marked_text("t", TextRange::new(1, 0));
        bridge.set_marked_text("", TextRange::new(0, 0));
        assert!(bridge.is_operator_pending());
        assert_eq!(bridge.queue().bytes(), b"t");
    }

    #[test]
    fn test_operator_with_line_editor() {
        let mut bridge = bridge(LineQueue::default());
        bridge.queue_mut().append(b"iabcabc\x1b0");

        bridge.set_marked_text("f", TextRange::new(1, 0));
        assert!(bridge.is_operator_pending());

        bridge.set_marked_text("c", TextRange::new(1, 0));
        assert_eq!(bridge.queue().cursor(), 2);
        assert_eq!(bridge.queue().mode(), LineMode::Normal);
    }

    #[test]
    fn test_editor_reports_awaiting() {
        let mut bridge = bridge(RecordingQueue::new(true));

        bridge.queue_mut().set_awaiting_char(true);
        bridge.set_marked_text("m", TextRange::new(1, 0));
        assert!(bridge.is_operator_pending());
    }

    #[test]
    fn test_inserted_text_consumes_operator() {
        let mut bridge = bridge(RecordingQueue::new(true));

        bridge.set_marked_text("f", TextRange::new(1, 0));
        bridge.insert_text("x");
        assert!(!bridge.is_operator_pending());

        // The next character is checked for being an operator again.
        bridge.set_marked_text("t", TextRange::new(1, 0));
        assert!(bridge.is_operator_pending());
        assert_eq!(bridge.queue().bytes(), b"fxt");

        bridge.delete_backward();
        assert!(!bridge.is_operator_pending());
        assert_eq!(bridge.queue().bytes(), b"fxt\x7f");
    }

    #[test]
    fn test_ctrl_operator_key() {
        let mut bridge = bridge(RecordingQueue::new(true));

        // Ctrl-F is sent instead of "f", and it takes no argument.
        bridge.set_ctrl_latch(true);
        bridge.set_marked_text("f", TextRange::new(1, 0));
        assert!(!bridge.is_operator_pending());
        assert_eq!(bridge.queue().bytes(), &[0x06u8]);

        // The editor can still report that it's waiting for a character.
        bridge.queue_mut().set_awaiting_char(true);
        bridge.set_ctrl_latch(true);
        bridge.set_marked_text("v", TextRange::new(1, 0));
        assert!(bridge.is_operator_pending());
    }

    #[test]
    fn test_focus_loss_clears_gate() {
        let mut bridge = bridge(RecordingQueue::new(true));

        bridge.set_marked_text("r", TextRange::new(1, 0));
        assert!(bridge.is_operator_pending());

        bridge.resign_focus();
        assert!(!bridge.is_operator_pending());
    }

    #[test]
    fn test_empty_base_mode_text() {
        let mut bridge = bridge(RecordingQueue::new(true));

        bridge.set_marked_text("", TextRange::new(0, 0));
        assert!(!bridge.is_composing());
        assert_eq!(bridge.queue().bytes(), b"");
        assert_eq!(bridge.deferred(), None);
    }

    #[test]
    fn test_empty_insert_mode_text() {
        let mut bridge = insert_bridge();

        // Empty text still starts a composition outside of the base mode.
        bridge.set_marked_text("", TextRange::new(0, 0));
        assert!(bridge.is_composing());
        assert_eq!(bridge.marked_range(), Some(TextRange::new(0, 0)));
    }

    #[test]
    fn test_newline_and_ctrl() {
        let mut bridge = bridge(RecordingQueue::new(false));

        bridge.insert_text("\n");
        assert_eq!(bridge.queue_mut().take_bytes(), b"\r".to_vec());

        bridge.set_ctrl_latch(true);
        bridge.insert_text("e");
        assert!(!bridge.ctrl_latched());
        assert_eq!(bridge.queue_mut().take_bytes(), vec![0x05]);

        // Text without a control character sends nothing, but still releases the latch.
        bridge.set_ctrl_latch(true);
        bridge.insert_text("é");
        assert!(!bridge.ctrl_latched());
        assert_eq!(bridge.queue().bytes(), b"");

        bridge.delete_backward();
        assert_eq!(bridge.queue().bytes(), b"\x7f");
    }

    #[test]
    fn test_newline_as_text() {
        let config = BridgeConfig::default().with_newline_as_enter(false);
        let mut bridge = InputBridge::new(RecordingQueue::new(false), config);

        bridge.insert_text("\n");
        assert_eq!(bridge.queue().bytes(), b"\n");
    }

    #[test]
    fn test_ranges() {
        let mut bridge = insert_bridge();

        assert_eq!(bridge.selected_range(), None);
        assert_eq!(bridge.marked_range(), None);
        assert_eq!(bridge.text_in(TextRange::new(0, 0)), None);

        bridge.set_marked_text("にほん", TextRange::new(3, 0));
        assert_eq!(bridge.selected_range(), Some(TextRange::new(3, 0)));
        assert_eq!(bridge.marked_range(), Some(TextRange::new(0, 3)));
        assert_eq!(bridge.text_in(TextRange::new(0, 2)), Some("にほ".to_string()));

        bridge.set_selected_range(TextRange::new(1, 1));
        assert_eq!(bridge.selected_range(), Some(TextRange::new(1, 1)));

        // Replacing is ignored.
        bridge.replace(TextRange::new(0, 3), "x");
        assert_eq!(bridge.queue().line(), "にほん");
    }

    #[test]
    fn test_selection_moves_editor_cursor() {
        let mut bridge = insert_bridge();
        bridge.insert_text("xy");

        bridge.set_marked_text("abc", TextRange::new(1, 0));
        assert_eq!(bridge.queue().cursor(), 3);

        bridge.set_selected_range(TextRange::new(3, 0));
        assert_eq!(bridge.queue().cursor(), 5);

        bridge.set_marked_text("abd", TextRange::new(3, 0));
        bridge.unmark_text();
        assert_eq!(bridge.queue().line(), "xyabd");
        assert_eq!(bridge.queue().cursor(), 5);
    }

    #[test]
    fn test_selection_moved_back_then_cancelled() {
        let mut bridge = insert_bridge();
        bridge.insert_text("xy");

        bridge.set_marked_text("abc", TextRange::new(3, 0));
        bridge.set_selected_range(TextRange::new(0, 0));
        assert_eq!(bridge.queue().cursor(), 2);

        bridge.cancel_marked_text();
        assert_eq!(bridge.queue().line(), "xy");
        assert_eq!(bridge.queue().cursor(), 2);
    }

    #[test]
    fn test_set_selected_range_without_composition() {
        let mut bridge = insert_bridge();

        bridge.set_selected_range(TextRange::new(1, 1));
        assert_eq!(bridge.selected_range(), None);
    }

    #[test]
    fn test_positions() {
        let mut bridge = insert_bridge();
        bridge.set_marked_text("abcd", TextRange::new(4, 0));

        let p = TextPosition::new(2);

        assert_eq!(bridge.beginning_of_document(), TextPosition::new(0));
        assert_eq!(bridge.end_of_document(), TextPosition::new(4));

        assert_eq!(bridge.position_from(p, 2), Some(TextPosition::new(4)));
        assert_eq!(bridge.position_from(p, 3), None);
        assert_eq!(bridge.position_from(p, -3), None);

        assert_eq!(
            bridge.position_in_direction(p, LayoutDirection::Left, 1),
            Some(TextPosition::new(3))
        );
        assert_eq!(
            bridge.position_in_direction(p, LayoutDirection::Down, 1),
            Some(TextPosition::new(1))
        );

        let zero = TextPosition::new(0);
        assert_eq!(bridge.position_in_direction(zero, LayoutDirection::Right, isize::MIN), None);
        assert_eq!(bridge.position_in_direction(zero, LayoutDirection::Left, isize::MIN), None);
        assert_eq!(
            bridge.position_in_direction(zero, LayoutDirection::Right, -4),
            Some(TextPosition::new(4))
        );

        assert_eq!(bridge.compare(p, TextPosition::new(3)), Ordering::Less);
        assert_eq!(bridge.compare(p, p), Ordering::Equal);
        assert_eq!(bridge.offset_between(TextPosition::new(3), p), -1);

        assert_eq!(bridge.text_range(TextPosition::new(3), p), TextRange::new(2, 1));
        assert_eq!(
            bridge.position_within(TextRange::new(1, 2), LayoutDirection::Right),
            TextPosition::new(3)
        );
        assert_eq!(
            bridge.character_range_by_extending(p, LayoutDirection::Up),
            Some(TextRange::new(1, 1))
        );
        assert_eq!(bridge.base_writing_direction(p), WritingDirection::LeftToRight);
    }

    #[test]
    fn test_positions_without_composition() {
        let bridge = insert_bridge();
        let zero = TextPosition::new(0);

        assert_eq!(bridge.end_of_document(), zero);
        assert_eq!(bridge.position_from(zero, 0), Some(zero));
        assert_eq!(bridge.position_from(zero, 1), None);
    }

    #[test]
    fn test_focus_before_flush() {
        let mut bridge = InputBridge::new(RecordingQueue::new(false), BridgeConfig::default());

        assert!(!bridge.acquire_focus());

        // Composition still proceeds even though focus can't be taken yet.
        bridge.set_marked_text("a", TextRange::new(1, 0));
        assert!(!bridge.is_focused());
        assert_eq!(bridge.queue().bytes(), b"a");

        bridge.mark_flushed();
        assert_eq!(bridge.run_deferred(), Some(DeferredTask::AcquireFocus));
        assert!(bridge.is_focused());
        assert_eq!(bridge.run_deferred(), None);
    }

    #[test]
    fn test_set_operators() {
        let mut bridge = bridge(RecordingQueue::new(true));

        assert!(bridge.set_operators("").is_err());
        bridge.set_operators("s").unwrap();

        bridge.set_marked_text("f", TextRange::new(1, 0));
        assert!(!bridge.is_operator_pending());

        bridge.set_marked_text("s", TextRange::new(1, 0));
        assert!(bridge.is_operator_pending());
    }

    #[test]
    fn test_vim_encoding() {
        let config = BridgeConfig::default().with_encoding(KeyEncodingKind::Vim);
        let mut bridge = InputBridge::new(RecordingQueue::new(false), config);

        bridge.set_marked_text("a", TextRange::new(0, 1));
        bridge.set_marked_text("À", TextRange::new(1, 0));

        assert_eq!(bridge.queue().bytes(), &[
            b'a', 0x80, b'k', b'l', // "a", then left
            0x80, b'k', b'r', 0x80, b'k', b'b', // right, backspace
            0xC3, 0x80, 0xFE, b'X', // "À"
        ]);
    }
}
