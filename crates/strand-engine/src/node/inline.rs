//! Inline span nodes and annotation marker pairs.

use serde::Serialize;

use crate::range::Range;

/// Reserved character opening an annotation marker sequence.
pub const MARKER_START: char = '☊';
/// Reserved character closing an annotation marker sequence.
pub const MARKER_END: char = '☋';
/// Indicator distinguishing a closing marker from an opening one.
pub const MARKER_CLOSING_INDICATOR: char = 'Ω';

/// An inline style span inside a block's visible text.
///
/// Style delimiters stay visible in the presentation string; they are only
/// stripped by the plain renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InlineNode {
    /// Plain text between special constructs.
    Text { range: Range },
    /// `*text*`
    Emphasis {
        range: Range,
        leading_delimiter_range: Range,
        trailing_delimiter_range: Range,
        text_range: Range,
    },
    /// `**text**`
    DoubleEmphasis {
        range: Range,
        leading_delimiter_range: Range,
        trailing_delimiter_range: Range,
        text_range: Range,
    },
    /// `` `text` `` — a raw zone, no constructs are parsed inside.
    CodeSpan {
        range: Range,
        leading_delimiter_range: Range,
        trailing_delimiter_range: Range,
        text_range: Range,
    },
}

impl InlineNode {
    /// Full backing-string span of the node, delimiters included.
    #[must_use]
    pub fn range(&self) -> Range {
        match self {
            InlineNode::Text { range }
            | InlineNode::Emphasis { range, .. }
            | InlineNode::DoubleEmphasis { range, .. }
            | InlineNode::CodeSpan { range, .. } => *range,
        }
    }

    /// The span of the node's text content, delimiters excluded.
    #[must_use]
    pub fn text_range(&self) -> Range {
        match self {
            InlineNode::Text { range } => *range,
            InlineNode::Emphasis { text_range, .. }
            | InlineNode::DoubleEmphasis { text_range, .. }
            | InlineNode::CodeSpan { text_range, .. } => *text_range,
        }
    }

    /// The delimiter ranges a renderer may fold away.
    #[must_use]
    pub fn foldable_ranges(&self) -> Vec<Range> {
        match self {
            InlineNode::Text { .. } => vec![],
            InlineNode::Emphasis {
                leading_delimiter_range,
                trailing_delimiter_range,
                ..
            }
            | InlineNode::DoubleEmphasis {
                leading_delimiter_range,
                trailing_delimiter_range,
                ..
            }
            | InlineNode::CodeSpan {
                leading_delimiter_range,
                trailing_delimiter_range,
                ..
            } => vec![*leading_delimiter_range, *trailing_delimiter_range],
        }
    }

    /// Shifts every range by `delta`, producing a new node.
    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        match self {
            InlineNode::Text { range } => InlineNode::Text {
                range: range.offset(delta),
            },
            InlineNode::Emphasis {
                range,
                leading_delimiter_range,
                trailing_delimiter_range,
                text_range,
            } => InlineNode::Emphasis {
                range: range.offset(delta),
                leading_delimiter_range: leading_delimiter_range.offset(delta),
                trailing_delimiter_range: trailing_delimiter_range.offset(delta),
                text_range: text_range.offset(delta),
            },
            InlineNode::DoubleEmphasis {
                range,
                leading_delimiter_range,
                trailing_delimiter_range,
                text_range,
            } => InlineNode::DoubleEmphasis {
                range: range.offset(delta),
                leading_delimiter_range: leading_delimiter_range.offset(delta),
                trailing_delimiter_range: trailing_delimiter_range.offset(delta),
                text_range: text_range.offset(delta),
            },
            InlineNode::CodeSpan {
                range,
                leading_delimiter_range,
                trailing_delimiter_range,
                text_range,
            } => InlineNode::CodeSpan {
                range: range.offset(delta),
                leading_delimiter_range: leading_delimiter_range.offset(delta),
                trailing_delimiter_range: trailing_delimiter_range.offset(delta),
                text_range: text_range.offset(delta),
            },
        }
    }
}

/// Which side of a pair a marker sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPosition {
    Opening,
    Closing,
}

/// One annotation marker: `☊<kind>|<id>☋` opening, `☊Ω<kind>|<id>☋` closing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineMarker {
    /// Full backing span of the marker sequence.
    pub range: Range,
    pub position: MarkerPosition,
    /// Correlates the opening marker with its closing marker.
    pub id: String,
}

impl InlineMarker {
    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            range: self.range.offset(delta),
            position: self.position,
            id: self.id.clone(),
        }
    }
}

/// A matched opening/closing marker pair wrapping a span of visible text.
///
/// Pairs with distinct ids may overlap; closing order is not required to
/// nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineMarkerPair {
    pub opening_marker: InlineMarker,
    pub closing_marker: InlineMarker,
}

impl InlineMarkerPair {
    #[must_use]
    pub fn new(opening_marker: InlineMarker, closing_marker: InlineMarker) -> Self {
        Self {
            opening_marker,
            closing_marker,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.opening_marker.id
    }

    /// The annotated text between the two markers.
    #[must_use]
    pub fn visible_range(&self) -> Range {
        let start = self.opening_marker.range.max();
        Range::new(start, self.closing_marker.range.location - start)
    }

    /// The full span from the start of the opening marker through the end of
    /// the closing marker.
    #[must_use]
    pub fn range(&self) -> Range {
        let start = self.opening_marker.range.location;
        Range::new(start, self.closing_marker.range.max() - start)
    }

    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        Self {
            opening_marker: self.opening_marker.offset(delta),
            closing_marker: self.closing_marker.offset(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair() -> InlineMarkerPair {
        InlineMarkerPair::new(
            InlineMarker {
                range: Range::new(33, 27),
                position: MarkerPosition::Opening,
                id: "3YA3fBfQystAGJj63asokU".into(),
            },
            InlineMarker {
                range: Range::new(63, 28),
                position: MarkerPosition::Closing,
                id: "3YA3fBfQystAGJj63asokU".into(),
            },
        )
    }

    #[test]
    fn visible_range_sits_between_markers() {
        assert_eq!(Range::new(60, 3), pair().visible_range());
    }

    #[test]
    fn range_spans_both_markers() {
        assert_eq!(Range::new(33, 58), pair().range());
    }

    #[test]
    fn offset_shifts_both_markers() {
        let shifted = pair().offset(5);
        assert_eq!(Range::new(38, 27), shifted.opening_marker.range);
        assert_eq!(Range::new(65, 3), shifted.visible_range());
    }
}
