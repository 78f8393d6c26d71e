//! # Text input protocol
//!
//! ## Overview
//!
//! Platform glue code often receives every text-input callback through a single entry point,
//! with positions and ranges passed around as opaque objects. [TextInputRequest] describes one of
//! those callbacks, and [InputBridge::handle] answers it with a [TextInputResponse].
//!
//! Handles that arrive as the wrong kind, like a range where a position was expected, produce a
//! [BridgeError](crate::errors::BridgeError) instead of being silently reinterpreted.
//!
//! ## Example
//!
//! ```
//! use modalime::bridge::InputBridge;
//! use modalime::config::BridgeConfig;
//! use modalime::protocol::{TextInputRequest, TextInputResponse};
//! use modalime::queue::RecordingQueue;
//! use modalime::types::{TextHandle, TextPosition, TextRange};
//!
//! let mut bridge = InputBridge::new(RecordingQueue::new(false), BridgeConfig::default());
//!
//! let req = TextInputRequest::SetMarkedText("ab".into(), TextRange::new(2, 0).into());
//! assert_eq!(bridge.handle(req).unwrap(), TextInputResponse::Done);
//!
//! let req = TextInputRequest::EndOfDocument;
//! let end = TextHandle::from(TextPosition::new(2));
//! assert_eq!(bridge.handle(req).unwrap(), TextInputResponse::Handle(Some(end)));
//!
//! // A position isn't a valid selection.
//! let req = TextInputRequest::SetSelectedRange(TextPosition::new(0).into());
//! assert!(bridge.handle(req).is_err());
//! ```
use std::cmp::Ordering;

use crate::bridge::InputBridge;
use crate::errors::BridgeResult;
use crate::queue::EditorQueue;
use crate::types::{
    LayoutDirection,
    TextHandle,
    TextPosition,
    TextRange,
    WritingDirection,
};

/// A callback from the platform's text-input system.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TextInputRequest {
    /// Set the composing text and the selection within it.
    SetMarkedText(String, TextHandle),

    /// Finish the current composition.
    UnmarkText,

    /// Type committed text.
    InsertText(String),

    /// Delete the character before the cursor.
    DeleteBackward,

    /// Ask whether there is text to delete.
    HasText,

    /// Get the selection within the composing text.
    SelectedRange,

    /// Move the selection within the composing text.
    SetSelectedRange(TextHandle),

    /// Get the range covering the composing text.
    MarkedRange,

    /// Get the composing text within a range.
    TextInRange(TextHandle),

    /// Replace the text in a range.
    ReplaceRange(TextHandle, String),

    /// Get the position at the start of the composing text.
    BeginningOfDocument,

    /// Get the position at the end of the composing text.
    EndOfDocument,

    /// Move a position by an offset.
    PositionFrom(TextHandle, isize),

    /// Move a position by an offset in a layout direction.
    PositionInDirection(TextHandle, LayoutDirection, isize),

    /// Compare two positions.
    ComparePositions(TextHandle, TextHandle),

    /// Get the signed distance between two positions.
    OffsetBetween(TextHandle, TextHandle),

    /// Build a range between two positions.
    TextRange(TextHandle, TextHandle),

    /// Get the edge of a range farthest in a layout direction.
    PositionWithinRange(TextHandle, LayoutDirection),

    /// Get a one-character range next to a position.
    CharacterRangeByExtending(TextHandle, LayoutDirection),

    /// Get the writing direction at a position.
    BaseWritingDirection(TextHandle),

    /// Change the writing direction of a range.
    SetBaseWritingDirection(WritingDirection, TextHandle),

    /// Get the styling for the composing text.
    MarkedTextStyle,
}

/// The answer to a [TextInputRequest].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TextInputResponse {
    /// The request was carried out and has no result.
    Done,

    /// A yes or no answer.
    Bool(bool),

    /// A position or range, if one exists.
    Handle(Option<TextHandle>),

    /// A piece of text, if there is any.
    Text(Option<String>),

    /// The result of comparing two positions.
    Ordering(Ordering),

    /// A signed distance between two positions.
    Offset(isize),

    /// A writing direction.
    WritingDirection(WritingDirection),

    /// No styling is applied.
    NoStyle,
}

fn pos(handle: TextHandle) -> BridgeResult<TextPosition> {
    Ok(TextPosition::try_from(handle)?)
}

fn range(handle: TextHandle) -> BridgeResult<TextRange> {
    Ok(TextRange::try_from(handle)?)
}

fn handle<T: Into<TextHandle>>(value: Option<T>) -> TextInputResponse {
    TextInputResponse::Handle(value.map(Into::into))
}

impl<Q: EditorQueue> InputBridge<Q> {
    /// Answer a request from the platform's text-input system.
    pub fn handle(&mut self, req: TextInputRequest) -> BridgeResult<TextInputResponse> {
        tracing::trace!(?req, "handling text input request");

        let resp = match req {
            TextInputRequest::SetMarkedText(text, selected) => {
                self.set_marked_text(&text, range(selected)?);
                TextInputResponse::Done
            },
            TextInputRequest::UnmarkText => {
                self.unmark_text();
                TextInputResponse::Done
            },
            TextInputRequest::InsertText(text) => {
                self.insert_text(&text);
                TextInputResponse::Done
            },
            TextInputRequest::DeleteBackward => {
                self.delete_backward();
                TextInputResponse::Done
            },
            TextInputRequest::HasText => TextInputResponse::Bool(self.has_text()),
            TextInputRequest::SelectedRange => handle(self.selected_range()),
            TextInputRequest::SetSelectedRange(selected) => {
                self.set_selected_range(range(selected)?);
                TextInputResponse::Done
            },
            TextInputRequest::MarkedRange => handle(self.marked_range()),
            TextInputRequest::TextInRange(r) => TextInputResponse::Text(self.text_in(range(r)?)),
            TextInputRequest::ReplaceRange(r, text) => {
                self.replace(range(r)?, &text);
                TextInputResponse::Done
            },
            TextInputRequest::BeginningOfDocument => handle(Some(self.beginning_of_document())),
            TextInputRequest::EndOfDocument => handle(Some(self.end_of_document())),
            TextInputRequest::PositionFrom(p, offset) => {
                handle(self.position_from(pos(p)?, offset))
            },
            TextInputRequest::PositionInDirection(p, dir, offset) => {
                handle(self.position_in_direction(pos(p)?, dir, offset))
            },
            TextInputRequest::ComparePositions(a, b) => {
                TextInputResponse::Ordering(self.compare(pos(a)?, pos(b)?))
            },
            TextInputRequest::OffsetBetween(a, b) => {
                TextInputResponse::Offset(self.offset_between(pos(a)?, pos(b)?))
            },
            TextInputRequest::TextRange(a, b) => handle(Some(self.text_range(pos(a)?, pos(b)?))),
            TextInputRequest::PositionWithinRange(r, dir) => {
                handle(Some(self.position_within(range(r)?, dir)))
            },
            TextInputRequest::CharacterRangeByExtending(p, dir) => {
                handle(self.character_range_by_extending(pos(p)?, dir))
            },
            TextInputRequest::BaseWritingDirection(p) => {
                TextInputResponse::WritingDirection(self.base_writing_direction(pos(p)?))
            },
            TextInputRequest::SetBaseWritingDirection(dir, r) => {
                self.set_base_writing_direction(dir, range(r)?);
                TextInputResponse::Done
            },
            TextInputRequest::MarkedTextStyle => TextInputResponse::NoStyle,
        };

        return Ok(resp);
    }
}
