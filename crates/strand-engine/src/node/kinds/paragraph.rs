use serde::Serialize;

use crate::node::inline::{InlineMarkerPair, InlineNode};
use crate::range::Range;

/// The fallback block: any line without a recognized prefix.
///
/// Paragraphs have no native prefix, so the whole line is visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub range: Range,
    pub visible_range: Range,
    pub subnodes: Vec<InlineNode>,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl Paragraph {
    #[must_use]
    pub fn from_line(range: Range) -> Self {
        Self {
            range,
            visible_range: range,
            subnodes: vec![],
            inline_marker_pairs: vec![],
        }
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
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
