use serde::Serialize;

use crate::node::{ATTACHMENT_CHARACTER, LEADING_NATIVE_PREFIX, TRAILING_NATIVE_PREFIX};
use crate::range::Range;
use crate::text::encode;

const DELIMITER: &str = "horizontal-rule";

/// A horizontal rule: `⧙horizontal-rule⧘` followed by the attachment
/// character that anchors its placeholder. Exact match only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HorizontalRule {
    pub range: Range,
    /// Everything but the trailing attachment character.
    pub native_prefix_range: Range,
}

impl HorizontalRule {
    #[must_use]
    pub fn from_line(line: &[u16], range: Range) -> Option<Self> {
        if line != encode(&Self::native_representation()).as_slice() {
            return None;
        }
        Some(Self {
            range,
            native_prefix_range: Range::new(range.location, range.length - 1),
        })
    }

    #[must_use]
    pub fn native_representation() -> String {
        format!(
            "{LEADING_NATIVE_PREFIX}{DELIMITER}{TRAILING_NATIVE_PREFIX}{ATTACHMENT_CHARACTER}"
        )
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            native_prefix_range: self.native_prefix_range.offset(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_exact_representation() {
        let line = encode(&HorizontalRule::native_representation());
        let rule = HorizontalRule::from_line(&line, Range::new(0, line.len())).unwrap();
        assert_eq!(Range::new(0, 18), rule.range);
        assert_eq!(Range::new(0, 17), rule.native_prefix_range);
    }

    #[test]
    fn rejects_missing_attachment_character() {
        let line = encode("⧙horizontal-rule⧘");
        assert_eq!(None, HorizontalRule::from_line(&line, Range::new(0, line.len())));
    }
}
