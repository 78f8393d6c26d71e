//! # modalime-types
//!
//! ## Overview
//!
//! The types in this crate describe locations and spans inside of a piece of composing text, in
//! the shape that platform text-input systems expect to address them. Offsets are counted in
//! UTF-16 code units, since that is what the platform reports selections in.
//!
//! ## Examples
//!
//! ```
//! use modalime_types::{LayoutDirection, TextPosition, TextRange};
//!
//! let start = TextPosition::new(1);
//! let end = TextPosition::new(4);
//!
//! // Ranges built from reversed positions are normalized.
//! let range = TextRange::between(end, start);
//! assert_eq!(range.location(), 1);
//! assert_eq!(range.len(), 3);
//!
//! assert_eq!(range.farthest(LayoutDirection::Left), start);
//! assert_eq!(range.farthest(LayoutDirection::Right), end);
//! ```
#![deny(missing_docs)]

pub mod text;
pub mod util;

pub use self::text::{HandleError, RangeError, TextHandle, TextPosition, TextRange};

/// Directions the platform asks the caret or a selection to move in.
///
/// Composing text is always a single line, so the vertical directions are treated as aliases of
/// the horizontal ones.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LayoutDirection {
    /// Towards the beginning of the line.
    Left,

    /// Towards the end of the line.
    Right,

    /// Treated the same as [LayoutDirection::Left].
    Up,

    /// Treated the same as [LayoutDirection::Right].
    Down,
}

impl LayoutDirection {
    /// Whether this direction points towards the beginning of the text.
    pub fn is_backward(&self) -> bool {
        match self {
            LayoutDirection::Left | LayoutDirection::Up => true,
            LayoutDirection::Right | LayoutDirection::Down => false,
        }
    }
}

/// The base writing direction of a piece of text.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WritingDirection {
    /// Whatever direction the platform considers natural.
    Natural,

    /// Text that flows from left to right.
    #[default]
    LeftToRight,

    /// Text that flows from right to left.
    RightToLeft,
}
