//! UTF-16 text storage.
//!
//! Every range in the engine is measured in UTF-16 code units so that
//! positions interoperate bit-exactly with editor surfaces that use UTF-16
//! string indexing. Storing the code units directly keeps all range
//! arithmetic O(1) instead of re-counting on every translation.

use std::fmt;

use crate::range::Range;

pub(crate) mod scanner;

/// A string of UTF-16 code units.
///
/// Backing and presentation strings are `Text` values internally; the public
/// API accepts and returns Rust `String`s at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    units: Vec<u16>,
}

impl Text {
    #[must_use]
    pub fn new(s: &str) -> Self {
        Self {
            units: s.encode_utf16().collect(),
        }
    }

    /// Length in UTF-16 code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// The code units covered by `range`.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds; callers validate ranges first.
    #[must_use]
    pub fn slice(&self, range: Range) -> &[u16] {
        &self.units[range.location..range.max()]
    }

    /// The substring covered by `range`, decoded to a `String`.
    ///
    /// Unpaired surrogates (possible when a range splits an astral character)
    /// decode to U+FFFD rather than failing.
    #[must_use]
    pub fn substring(&self, range: Range) -> String {
        String::from_utf16_lossy(self.slice(range))
    }

    /// A new text with `range` replaced by `replacement`.
    #[must_use]
    pub fn replacing(&self, range: Range, replacement: &str) -> Text {
        let mut units = Vec::with_capacity(self.len() - range.length + replacement.len());
        units.extend_from_slice(&self.units[..range.location]);
        units.extend(replacement.encode_utf16());
        units.extend_from_slice(&self.units[range.max()..]);
        Text { units }
    }

    /// A new text with every given disjoint sub-range deleted.
    ///
    /// `ranges` must be ascending and non-overlapping, expressed in this
    /// text's own coordinates.
    #[must_use]
    pub fn removing(&self, ranges: &[Range]) -> Text {
        let mut units = Vec::with_capacity(self.len());
        let mut cursor = 0;
        for range in ranges {
            units.extend_from_slice(&self.units[cursor..range.location]);
            cursor = range.max();
        }
        units.extend_from_slice(&self.units[cursor..]);
        Text { units }
    }

    pub fn push_str(&mut self, s: &str) {
        self.units.extend(s.encode_utf16());
    }

    pub fn push_units(&mut self, units: &[u16]) {
        self.units.extend_from_slice(units);
    }

    pub fn push_char(&mut self, c: char) {
        let mut buf = [0u16; 2];
        self.units.extend_from_slice(c.encode_utf16(&mut buf));
    }

    /// Ranges of the newline-delimited lines, excluding the `\n` separators.
    ///
    /// Empty segments are kept, so a trailing newline yields a trailing empty
    /// line. The empty text has no lines at all.
    #[must_use]
    pub fn line_ranges(&self) -> Vec<Range> {
        if self.is_empty() {
            return vec![];
        }
        let mut ranges = vec![];
        let mut start = 0;
        for (i, &unit) in self.units.iter().enumerate() {
            if unit == u16::from(b'\n') {
                ranges.push(Range::new(start, i - start));
                start = i + 1;
            }
        }
        ranges.push(Range::new(start, self.len() - start));
        ranges
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf16_lossy(&self.units))
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::new(s)
    }
}

/// Encodes a literal to UTF-16 units, for grammar-token matching.
#[must_use]
pub(crate) fn encode(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Whether `units` starts with the UTF-16 encoding of `prefix`.
#[must_use]
pub(crate) fn starts_with(units: &[u16], prefix: &str) -> bool {
    let mut i = 0;
    for unit in prefix.encode_utf16() {
        if units.get(i) != Some(&unit) {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn length_counts_utf16_units() {
        // BMP characters are one unit, astral characters two.
        assert_eq!(5, Text::new("héllo").len());
        assert_eq!(2, Text::new("😀").len());
        assert_eq!(1, Text::new("⧙").len());
    }

    #[test]
    fn substring_by_range() {
        let text = Text::new("⧙blockquote⧘> Two");
        assert_eq!("Two", text.substring(Range::new(14, 3)));
    }

    #[test]
    fn replacing_splices_units() {
        let text = Text::new("Title\nOne\nTwo");
        assert_eq!("Title\nOneTwo", text.replacing(Range::new(9, 1), "").to_string());
        assert_eq!(
            "Title!\nOne\nTwo",
            text.replacing(Range::new(5, 0), "!").to_string()
        );
    }

    #[test]
    fn removing_strips_sorted_disjoint_ranges() {
        let text = Text::new("a**b**c");
        let stripped = text.removing(&[Range::new(1, 2), Range::new(4, 2)]);
        assert_eq!("abc", stripped.to_string());
    }

    #[test]
    fn line_ranges_keep_empty_segments() {
        let text = Text::new("Hello\n");
        assert_eq!(vec![Range::new(0, 5), Range::new(6, 0)], text.line_ranges());
    }

    #[test]
    fn line_ranges_empty_text_has_no_lines() {
        assert!(Text::new("").line_ranges().is_empty());
    }

    #[test]
    fn starts_with_matches_multibyte_delimiters() {
        let units = encode("⧙doc-heading-x⧘");
        assert!(starts_with(&units, "⧙doc-heading-"));
        assert!(!starts_with(&units, "⧙code"));
    }
}
