use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::node::inline::{InlineMarkerPair, InlineNode};
use crate::range::Range;

/// Hashes plus the mandatory space. Headings are markdown-style, not
/// native-prefixed; their delimiter stays visible in the presentation string.
static DELIMITER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6}) ").unwrap());

/// A section heading: `# <text>` through `###### <text>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub range: Range,
    /// Same as `range`: nothing in a heading is hidden.
    pub visible_range: Range,
    /// 1 through 6.
    pub level: u8,
    /// The hashes and the following space, foldable by a UI but never hidden.
    pub leading_delimiter_range: Range,
    pub text_range: Range,
    pub subnodes: Vec<InlineNode>,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl Heading {
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        // The delimiter is pure ASCII and anchored, so byte offsets equal
        // UTF-16 unit offsets.
        let decoded = String::from_utf16_lossy(line);
        let captures = DELIMITER.captures(&decoded)?;
        let delimiter_len = captures.get(0).unwrap().len();
        let level = captures.get(1).unwrap().len() as u8;

        Some(Self {
            range,
            visible_range: range,
            level,
            leading_delimiter_range: Range::new(range.location, delimiter_len),
            text_range: Range::new(range.location + delimiter_len, range.length - delimiter_len),
            subnodes: vec![],
            inline_marker_pairs: vec![],
        })
    }

    /// Ranges a UI may fold while the cursor is elsewhere.
    #[must_use]
    pub fn foldable_ranges(&self) -> Vec<Range> {
        vec![self.leading_delimiter_range]
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            visible_range: self.visible_range.offset(delta),
            level: self.level,
            leading_delimiter_range: self.leading_delimiter_range.offset(delta),
            text_range: self.text_range.offset(delta),
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
    fn parses_level_and_delimiter() {
        let line = encode("## Metrics");
        let heading = Heading::from_line(&line, Range::new(260, line.len())).unwrap();
        assert_eq!(2, heading.level);
        assert_eq!(Range::new(260, 3), heading.leading_delimiter_range);
        assert_eq!(Range::new(263, 7), heading.text_range);
        assert_eq!(vec![Range::new(260, 3)], heading.foldable_ranges());
    }

    #[test]
    fn rejects_seven_hashes() {
        let line = encode("####### Too deep");
        assert_eq!(None, Heading::from_line(&line, Range::new(0, line.len())));
    }

    #[test]
    fn rejects_missing_space() {
        let line = encode("#NoSpace");
        assert_eq!(None, Heading::from_line(&line, Range::new(0, line.len())));
    }
}
