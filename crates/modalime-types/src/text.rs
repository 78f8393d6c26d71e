//! # Positions and Ranges
//!
//! ## Overview
//!
//! Platform text-input systems address text through opaque position and range objects. Here
//! those are plain values: a [TextPosition] is an offset, and a [TextRange] is a location and a
//! length, both measured in UTF-16 code units.
//!
//! Where the platform hands back an object that could be either, it is represented as a
//! [TextHandle], and converted into the concrete type with [TryFrom].
use std::cmp::Ordering;

use crate::util::sort2;
use crate::LayoutDirection;

/// Errors from building a [TextRange] out of signed values.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum RangeError {
    /// The range would start before the beginning of the text.
    #[error("Range location is negative: {0}")]
    NegativeLocation(isize),

    /// The range would have a negative length.
    #[error("Range length is negative: {0}")]
    NegativeLength(isize),
}

/// Errors from converting a [TextHandle] into a concrete type.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum HandleError {
    /// A range was given where a position was expected.
    #[error("Expected a position, but got a range: {0:?}")]
    ExpectedPosition(TextRange),

    /// A position was given where a range was expected.
    #[error("Expected a range, but got a position: {0:?}")]
    ExpectedRange(TextPosition),
}

/// A location within composing text.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct TextPosition {
    offset: usize,
}

impl TextPosition {
    /// Create a position at the given UTF-16 offset.
    pub fn new(offset: usize) -> Self {
        TextPosition { offset }
    }

    /// The UTF-16 offset of this position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Shift this position by a signed amount, failing if the result would fall outside of
    /// `0..=max`.
    pub fn shifted(&self, by: isize, max: usize) -> Option<TextPosition> {
        let new = isize::try_from(self.offset).ok()?.checked_add(by)?;

        if new < 0 || new as usize > max {
            return None;
        }

        return Some(TextPosition::new(new as usize));
    }

    /// The signed number of code units from this position to `other`.
    ///
    /// Distances too large to represent saturate at the bounds of [isize].
    pub fn distance_to(&self, other: &TextPosition) -> isize {
        if other.offset >= self.offset {
            isize::try_from(other.offset - self.offset).unwrap_or(isize::MAX)
        } else {
            isize::try_from(self.offset - other.offset).map_or(isize::MIN, |d| -d)
        }
    }
}

impl From<&TextPosition> for TextPosition {
    fn from(pos: &TextPosition) -> Self {
        TextPosition::new(pos.offset)
    }
}

impl From<usize> for TextPosition {
    fn from(offset: usize) -> Self {
        TextPosition::new(offset)
    }
}

impl PartialOrd for TextPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

/// A span of composing text.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct TextRange {
    location: usize,
    length: usize,
}

impl TextRange {
    /// Create a range that starts at `location` and covers `length` code units.
    pub fn new(location: usize, length: usize) -> Self {
        TextRange { location, length }
    }

    /// Create a range from signed values, such as those reported by a platform API.
    pub fn try_new(location: isize, length: isize) -> Result<Self, RangeError> {
        if location < 0 {
            return Err(RangeError::NegativeLocation(location));
        }

        if length < 0 {
            return Err(RangeError::NegativeLength(length));
        }

        return Ok(TextRange::new(location as usize, length as usize));
    }

    /// Create a range covering the text between two positions.
    ///
    /// If `end` comes before `start`, then the two are swapped, so that the range never has a
    /// negative length. Callers that care about the direction can use
    /// [TextPosition::distance_to].
    pub fn between(start: TextPosition, end: TextPosition) -> Self {
        let (start, end) = sort2(start, end);

        TextRange::new(start.offset, end.offset - start.offset)
    }

    /// An empty range at the given position, used for a caret.
    pub fn caret(at: TextPosition) -> Self {
        TextRange::new(at.offset, 0)
    }

    /// Where this range begins.
    pub fn location(&self) -> usize {
        self.location
    }

    /// How many code units this range covers.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether this range covers no text.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The position at the beginning of this range.
    pub fn start(&self) -> TextPosition {
        TextPosition::new(self.location)
    }

    /// The position just past the end of this range, saturating at [usize::MAX].
    pub fn end(&self) -> TextPosition {
        TextPosition::new(self.location.saturating_add(self.length))
    }

    /// The edge of this range that lies farthest in the given direction.
    pub fn farthest(&self, dir: LayoutDirection) -> TextPosition {
        if dir.is_backward() {
            self.start()
        } else {
            self.end()
        }
    }

    /// A one-unit range next to `at`, in the given direction.
    ///
    /// Moving backwards from the beginning of the text produces nothing.
    pub fn extending(at: TextPosition, dir: LayoutDirection) -> Option<Self> {
        if dir.is_backward() {
            let location = at.offset.checked_sub(1)?;

            Some(TextRange::new(location, 1))
        } else {
            Some(TextRange::new(at.offset, 1))
        }
    }
}

/// An opaque position or range passed between the platform and the bridge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextHandle {
    /// A handle to a single position.
    Position(TextPosition),

    /// A handle to a range of text.
    Range(TextRange),
}

impl From<TextPosition> for TextHandle {
    fn from(pos: TextPosition) -> Self {
        TextHandle::Position(pos)
    }
}

impl From<TextRange> for TextHandle {
    fn from(range: TextRange) -> Self {
        TextHandle::Range(range)
    }
}

impl TryFrom<TextHandle> for TextPosition {
    type Error = HandleError;

    fn try_from(handle: TextHandle) -> Result<Self, Self::Error> {
        match handle {
            TextHandle::Position(pos) => Ok(pos),
            TextHandle::Range(range) => Err(HandleError::ExpectedPosition(range)),
        }
    }
}

impl TryFrom<TextHandle> for TextRange {
    type Error = HandleError;

    fn try_from(handle: TextHandle) -> Result<Self, Self::Error> {
        match handle {
            TextHandle::Range(range) => Ok(range),
            TextHandle::Position(pos) => Err(HandleError::ExpectedRange(pos)),
        }
    }
}
