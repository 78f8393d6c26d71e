//! # UTF-16 helpers
//!
//! Platform text-input systems measure text in UTF-16 code units, while Rust strings are UTF-8
//! and editors count characters. These helpers convert between the three.

/// Length of `s` in UTF-16 code units.
#[inline]
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Number of whole characters that fit into the first `units` UTF-16 code units of `s`.
///
/// A count that ends in the middle of a surrogate pair does not include that character, and
/// counts past the end of `s` are clamped to its length.
pub fn utf16_to_chars(s: &str, units: usize) -> usize {
    let mut seen = 0;
    let mut count = 0;

    for c in s.chars() {
        seen += c.len_utf16();

        if seen > units {
            break;
        }

        count += 1;
    }

    return count;
}

/// Convert a UTF-16 offset into a byte index into `s`.
///
/// Returns `None` if the offset is past the end of `s`, or if it points into the middle of a
/// surrogate pair.
pub fn utf16_to_byte(s: &str, units: usize) -> Option<usize> {
    let mut seen = 0;

    for (idx, c) in s.char_indices() {
        if seen == units {
            return Some(idx);
        }

        if seen > units {
            return None;
        }

        seen += c.len_utf16();
    }

    if seen == units {
        Some(s.len())
    } else {
        None
    }
}

/// Slice `s` using UTF-16 offsets.
pub fn utf16_slice(s: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }

    let bs = utf16_to_byte(s, start)?;
    let be = utf16_to_byte(s, end)?;

    return s.get(bs..be);
}

#[inline]
pub(crate) fn sort2<T>(a: T, b: T) -> (T, T)
where
    T: Ord,
{
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
