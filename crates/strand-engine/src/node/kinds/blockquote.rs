use serde::Serialize;

use crate::node::inline::{InlineMarkerPair, InlineNode};
use crate::node::{LEADING_NATIVE_PREFIX, TRAILING_NATIVE_PREFIX};
use crate::range::Range;
use crate::text::scanner::Scanner;

const DELIMITER: &str = "blockquote";
/// Content indicator following the native prefix; hidden along with it.
const CONTENT_INDICATOR: &str = "> ";

/// A quote block: `⧙blockquote⧘> <text>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blockquote {
    pub range: Range,
    /// Covers the delimited tag and the `> ` content indicator.
    pub native_prefix_range: Range,
    pub visible_range: Range,
    pub subnodes: Vec<InlineNode>,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl Blockquote {
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        let mut scanner = Scanner::new(line);
        if !scanner.scan_char(LEADING_NATIVE_PREFIX)
            || !scanner.scan_str(DELIMITER)
            || !scanner.scan_char(TRAILING_NATIVE_PREFIX)
            || !scanner.scan_str(CONTENT_INDICATOR)
        {
            return None;
        }
        let prefix_len = scanner.pos();

        Some(Self {
            range,
            native_prefix_range: Range::new(range.location, prefix_len),
            visible_range: Range::new(range.location + prefix_len, range.length - prefix_len),
            subnodes: vec![],
            inline_marker_pairs: vec![],
        })
    }

    #[must_use]
    pub fn native_representation(text: &str) -> String {
        format!(
            "{LEADING_NATIVE_PREFIX}{DELIMITER}{TRAILING_NATIVE_PREFIX}{CONTENT_INDICATOR}{text}"
        )
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            native_prefix_range: self.native_prefix_range.offset(delta),
            visible_range: self.visible_range.offset(delta),
            subnodes: self.subnodes.iter().map(|n| n.offset(delta)).collect(),
            inline_marker_pairs: self
                .inline_marker_pairs
                .iter()
                .map(|p| p.offset(delta))
                .collect(),
        }
    }
}
