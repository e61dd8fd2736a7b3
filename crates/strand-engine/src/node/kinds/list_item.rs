use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::node::inline::{InlineMarkerPair, InlineNode};
use crate::node::{Indentation, LEADING_NATIVE_PREFIX, TRAILING_NATIVE_PREFIX};
use crate::range::Range;
use crate::text::scanner::Scanner;

const UNORDERED_DELIMITER: &str = "unordered-list";
const ORDERED_DELIMITER: &str = "ordered-list";

/// Ordinal plus the `. ` separator at the start of an ordered item's content.
static ORDINAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)\. ").unwrap());

/// An unordered list item: `⧙unordered-list-<d>⧘- <text>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnorderedListItem {
    pub range: Range,
    /// Covers the delimited tag and the `- ` marker.
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub indentation: Indentation,
    pub indentation_range: Range,
    pub subnodes: Vec<InlineNode>,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl UnorderedListItem {
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        let mut scanner = Scanner::new(line);
        if !scanner.scan_char(LEADING_NATIVE_PREFIX)
            || !scanner.scan_str(UNORDERED_DELIMITER)
            || !scanner.scan_char('-')
        {
            return None;
        }
        let indentation_location = scanner.pos();
        let indentation = Indentation(scanner.scan_digit()?);
        if !scanner.scan_char(TRAILING_NATIVE_PREFIX) || !scanner.scan_str("- ") {
            return None;
        }
        let prefix_len = scanner.pos();

        Some(Self {
            range,
            native_prefix_range: Range::new(range.location, prefix_len),
            visible_range: Range::new(range.location + prefix_len, range.length - prefix_len),
            indentation,
            indentation_range: Range::new(range.location + indentation_location, 1),
            subnodes: vec![],
            inline_marker_pairs: vec![],
        })
    }

    #[must_use]
    pub fn native_representation(indentation: Indentation, text: &str) -> String {
        format!(
            "{LEADING_NATIVE_PREFIX}{UNORDERED_DELIMITER}-{}{TRAILING_NATIVE_PREFIX}- {text}",
            indentation.0
        )
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            native_prefix_range: self.native_prefix_range.offset(delta),
            visible_range: self.visible_range.offset(delta),
            indentation: self.indentation,
            indentation_range: self.indentation_range.offset(delta),
            subnodes: self.subnodes.iter().map(|n| n.offset(delta)).collect(),
            inline_marker_pairs: self
                .inline_marker_pairs
                .iter()
                .map(|p| p.offset(delta))
                .collect(),
        }
    }
}

/// An ordered list item: `⧙ordered-list-<d>⧘<n>. <text>`.
///
/// The written ordinal is part of the hidden prefix; renderers renumber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedListItem {
    pub range: Range,
    /// Covers the delimited tag and the written `<n>. ` ordinal.
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub indentation: Indentation,
    pub indentation_range: Range,
    pub number: u32,
    pub number_range: Range,
    pub subnodes: Vec<InlineNode>,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl OrderedListItem {
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        let mut scanner = Scanner::new(line);
        if !scanner.scan_char(LEADING_NATIVE_PREFIX)
            || !scanner.scan_str(ORDERED_DELIMITER)
            || !scanner.scan_char('-')
        {
            return None;
        }
        let indentation_location = scanner.pos();
        let indentation = Indentation(scanner.scan_digit()?);
        if !scanner.scan_char(TRAILING_NATIVE_PREFIX) {
            return None;
        }
        let ordinal_location = scanner.pos();

        // The ordinal and separator are ASCII, so the regex byte offsets
        // equal UTF-16 unit offsets within the remainder.
        let remainder = String::from_utf16_lossy(&line[ordinal_location..]);
        let captures = ORDINAL.captures(&remainder)?;
        let digits = captures.get(1).unwrap();
        let number = digits.as_str().parse().ok()?;
        let prefix_len = ordinal_location + captures.get(0).unwrap().len();

        Some(Self {
            range,
            native_prefix_range: Range::new(range.location, prefix_len),
            visible_range: Range::new(range.location + prefix_len, range.length - prefix_len),
            indentation,
            indentation_range: Range::new(range.location + indentation_location, 1),
            number,
            number_range: Range::new(range.location + ordinal_location, digits.len()),
            subnodes: vec![],
            inline_marker_pairs: vec![],
        })
    }

    #[must_use]
    pub fn native_representation(indentation: Indentation, number: u32, text: &str) -> String {
        format!(
            "{LEADING_NATIVE_PREFIX}{ORDERED_DELIMITER}-{}{TRAILING_NATIVE_PREFIX}{number}. {text}",
            indentation.0
        )
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            native_prefix_range: self.native_prefix_range.offset(delta),
            visible_range: self.visible_range.offset(delta),
            indentation: self.indentation,
            indentation_range: self.indentation_range.offset(delta),
            number: self.number,
            number_range: self.number_range.offset(delta),
            subnodes: self.subnodes.iter().map(|n| n.offset(delta)).collect(),
            inline_marker_pairs: self
                .inline_marker_pairs
                .iter()
                .map(|p| p.offset(delta))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::encode;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_unordered_item() {
        let line = encode("⧙unordered-list-0⧘- Hi");
        let item = UnorderedListItem::from_line(&line, Range::new(0, line.len())).unwrap();
        assert_eq!(Range::new(0, 20), item.native_prefix_range);
        assert_eq!(Range::new(20, 2), item.visible_range);
        assert_eq!(Indentation(0), item.indentation);
        assert_eq!(Range::new(16, 1), item.indentation_range);
    }

    #[test]
    fn unordered_requires_dash_marker() {
        let line = encode("⧙unordered-list-0⧘-[ ]Hi");
        assert_eq!(
            None,
            UnorderedListItem::from_line(&line, Range::new(0, line.len()))
        );
    }

    #[test]
    fn parses_ordered_item() {
        let line = encode("⧙ordered-list-0⧘1. One");
        let item = OrderedListItem::from_line(&line, Range::new(39, line.len())).unwrap();
        assert_eq!(Range::new(39, 19), item.native_prefix_range);
        assert_eq!(Range::new(58, 3), item.visible_range);
        assert_eq!(1, item.number);
        assert_eq!(Range::new(55, 1), item.number_range);
    }

    #[test]
    fn parses_multi_digit_ordinal() {
        let line = encode("⧙ordered-list-2⧘12. Twelve");
        let item = OrderedListItem::from_line(&line, Range::new(0, line.len())).unwrap();
        assert_eq!(12, item.number);
        assert_eq!(Indentation(2), item.indentation);
        assert_eq!(Range::new(16, 2), item.number_range);
    }

    #[test]
    fn ordered_requires_separator() {
        let line = encode("⧙ordered-list-0⧘1 One");
        assert_eq!(
            None,
            OrderedListItem::from_line(&line, Range::new(0, line.len()))
        );
    }
}
