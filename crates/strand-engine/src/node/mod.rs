//! The polymorphic node model.
//!
//! Blocks and inline spans are tagged variants rather than trait objects:
//! adding a block kind means adding a variant plus a parser rule, and every
//! capability query is an explicit pattern match.

pub mod inline;
pub mod kinds;

use serde::Serialize;

use crate::range::Range;

pub use inline::{InlineMarker, InlineMarkerPair, InlineNode, MarkerPosition};
pub use kinds::{
    Blockquote, ChecklistItem, ChecklistState, CodeBlock, Heading, HorizontalRule, Image,
    ImageMeta, OrderedListItem, Paragraph, Title, UnorderedListItem,
};

/// Reserved character opening a native prefix.
pub const LEADING_NATIVE_PREFIX: char = '⧙';
/// Reserved character closing a native prefix.
pub const TRAILING_NATIVE_PREFIX: char = '⧘';
/// The single placeholder unit an attachable block contributes to the
/// presentation string (U+FFFC OBJECT REPLACEMENT CHARACTER).
pub const ATTACHMENT_CHARACTER: char = '\u{FFFC}';

/// Nesting level of a list-family block, from the digit in its native prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indentation(pub u8);

/// A block-level node. One per newline-delimited line of the backing string.
///
/// Sibling ranges are contiguous modulo the single separating newline, which
/// belongs to no block: `blocks[i].range.max() + 1 ==
/// blocks[i + 1].range.location`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockNode {
    Title(Title),
    Paragraph(Paragraph),
    Blockquote(Blockquote),
    Heading(Heading),
    CodeBlock(CodeBlock),
    UnorderedListItem(UnorderedListItem),
    OrderedListItem(OrderedListItem),
    ChecklistItem(ChecklistItem),
    Image(Image),
    HorizontalRule(HorizontalRule),
}

impl BlockNode {
    /// Full backing-string span of the line.
    #[must_use]
    pub fn range(&self) -> Range {
        match self {
            BlockNode::Title(n) => n.range,
            BlockNode::Paragraph(n) => n.range,
            BlockNode::Blockquote(n) => n.range,
            BlockNode::Heading(n) => n.range,
            BlockNode::CodeBlock(n) => n.range,
            BlockNode::UnorderedListItem(n) => n.range,
            BlockNode::OrderedListItem(n) => n.range,
            BlockNode::ChecklistItem(n) => n.range,
            BlockNode::Image(n) => n.range,
            BlockNode::HorizontalRule(n) => n.range,
        }
    }

    /// The span that survives into the presentation string.
    ///
    /// For attachables this is the single unit at the end of the native
    /// prefix region, anchoring the placeholder.
    #[must_use]
    pub fn visible_range(&self) -> Range {
        match self {
            BlockNode::Title(n) => n.visible_range,
            BlockNode::Paragraph(n) => n.visible_range,
            BlockNode::Blockquote(n) => n.visible_range,
            BlockNode::Heading(n) => n.visible_range,
            BlockNode::CodeBlock(n) => n.visible_range,
            BlockNode::UnorderedListItem(n) => n.visible_range,
            BlockNode::OrderedListItem(n) => n.visible_range,
            BlockNode::ChecklistItem(n) => n.visible_range,
            BlockNode::Image(n) => Range::new(n.native_prefix_range.max(), 1),
            BlockNode::HorizontalRule(n) => Range::new(n.native_prefix_range.max(), 1),
        }
    }

    /// The block's hidden sub-ranges, ascending and disjoint: the native
    /// prefix (when the kind has one) plus any paired annotation markers.
    #[must_use]
    pub fn hidden_ranges(&self) -> Vec<Range> {
        let mut ranges = vec![];
        match self {
            BlockNode::Title(n) => ranges.push(n.native_prefix_range),
            BlockNode::Blockquote(n) => ranges.push(n.native_prefix_range),
            BlockNode::CodeBlock(n) => ranges.push(n.native_prefix_range),
            BlockNode::UnorderedListItem(n) => ranges.push(n.native_prefix_range),
            BlockNode::OrderedListItem(n) => ranges.push(n.native_prefix_range),
            BlockNode::ChecklistItem(n) => ranges.push(n.native_prefix_range),
            BlockNode::Image(n) => ranges.push(n.native_prefix_range),
            BlockNode::HorizontalRule(n) => ranges.push(n.native_prefix_range),
            BlockNode::Paragraph(_) | BlockNode::Heading(_) => {}
        }
        for pair in self.inline_marker_pairs() {
            ranges.push(pair.opening_marker.range);
            ranges.push(pair.closing_marker.range);
        }
        ranges.sort_by_key(|r| r.location);
        ranges
    }

    /// Whether the block is an atomic embedded object contributing exactly
    /// one placeholder unit to the presentation string.
    #[must_use]
    pub fn is_attachable(&self) -> bool {
        matches!(self, BlockNode::Image(_) | BlockNode::HorizontalRule(_))
    }

    /// Indentation level for Positionable kinds (the list family).
    #[must_use]
    pub fn position(&self) -> Option<Indentation> {
        match self {
            BlockNode::UnorderedListItem(n) => Some(n.indentation),
            BlockNode::OrderedListItem(n) => Some(n.indentation),
            BlockNode::ChecklistItem(n) => Some(n.indentation),
            _ => None,
        }
    }

    /// Child inline span nodes, empty for kinds that carry none.
    #[must_use]
    pub fn subnodes(&self) -> &[InlineNode] {
        match self {
            BlockNode::Title(n) => &n.subnodes,
            BlockNode::Paragraph(n) => &n.subnodes,
            BlockNode::Blockquote(n) => &n.subnodes,
            BlockNode::Heading(n) => &n.subnodes,
            BlockNode::UnorderedListItem(n) => &n.subnodes,
            BlockNode::OrderedListItem(n) => &n.subnodes,
            BlockNode::ChecklistItem(n) => &n.subnodes,
            BlockNode::CodeBlock(_) | BlockNode::Image(_) | BlockNode::HorizontalRule(_) => &[],
        }
    }

    /// Annotation marker pairs, empty for kinds that cannot carry them.
    #[must_use]
    pub fn inline_marker_pairs(&self) -> &[InlineMarkerPair] {
        match self {
            BlockNode::Title(n) => &n.inline_marker_pairs,
            BlockNode::Paragraph(n) => &n.inline_marker_pairs,
            BlockNode::Blockquote(n) => &n.inline_marker_pairs,
            BlockNode::Heading(n) => &n.inline_marker_pairs,
            BlockNode::CodeBlock(n) => &n.inline_marker_pairs,
            BlockNode::UnorderedListItem(n) => &n.inline_marker_pairs,
            BlockNode::OrderedListItem(n) => &n.inline_marker_pairs,
            BlockNode::ChecklistItem(n) => &n.inline_marker_pairs,
            BlockNode::Image(_) | BlockNode::HorizontalRule(_) => &[],
        }
    }

    /// The region the inline scanner should examine, in absolute backing
    /// coordinates. `None` for attachables. Code blocks are scanned for
    /// markers only, never style spans.
    #[must_use]
    pub fn inline_text_range(&self) -> Option<Range> {
        match self {
            BlockNode::Heading(n) => Some(n.text_range),
            BlockNode::Image(_) | BlockNode::HorizontalRule(_) => None,
            _ => Some(self.visible_range()),
        }
    }

    /// Shifts the block and all descendant ranges by `delta`, producing a
    /// new tree. Applied after prefix-length changes.
    #[must_use]
    pub fn offset(&self, delta: isize) -> Self {
        match self {
            BlockNode::Title(n) => BlockNode::Title(n.offset(delta)),
            BlockNode::Paragraph(n) => BlockNode::Paragraph(n.offset(delta)),
            BlockNode::Blockquote(n) => BlockNode::Blockquote(n.offset(delta)),
            BlockNode::Heading(n) => BlockNode::Heading(n.offset(delta)),
            BlockNode::CodeBlock(n) => BlockNode::CodeBlock(n.offset(delta)),
            BlockNode::UnorderedListItem(n) => BlockNode::UnorderedListItem(n.offset(delta)),
            BlockNode::OrderedListItem(n) => BlockNode::OrderedListItem(n.offset(delta)),
            BlockNode::ChecklistItem(n) => BlockNode::ChecklistItem(n.offset(delta)),
            BlockNode::Image(n) => BlockNode::Image(n.offset(delta)),
            BlockNode::HorizontalRule(n) => BlockNode::HorizontalRule(n.offset(delta)),
        }
    }

    /// Installs the inline scan results. Style spans are discarded for code
    /// blocks (raw zone) and attachables.
    pub(crate) fn set_inline(
        &mut self,
        subnodes: Vec<InlineNode>,
        pairs: Vec<InlineMarkerPair>,
    ) {
        match self {
            BlockNode::Title(n) => {
                n.subnodes = subnodes;
                n.inline_marker_pairs = pairs;
            }
            BlockNode::Paragraph(n) => {
                n.subnodes = subnodes;
                n.inline_marker_pairs = pairs;
            }
            BlockNode::Blockquote(n) => {
                n.subnodes = subnodes;
                n.inline_marker_pairs = pairs;
            }
            BlockNode::Heading(n) => {
                n.subnodes = subnodes;
                n.inline_marker_pairs = pairs;
            }
            BlockNode::CodeBlock(n) => {
                n.inline_marker_pairs = pairs;
            }
            BlockNode::UnorderedListItem(n) => {
                n.subnodes = subnodes;
                n.inline_marker_pairs = pairs;
            }
            BlockNode::OrderedListItem(n) => {
                n.subnodes = subnodes;
                n.inline_marker_pairs = pairs;
            }
            BlockNode::ChecklistItem(n) => {
                n.subnodes = subnodes;
                n.inline_marker_pairs = pairs;
            }
            BlockNode::Image(_) | BlockNode::HorizontalRule(_) => {}
        }
    }
}

/// A borrowed view of any node in the tree, returned by recursive queries.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Block(&'a BlockNode),
    Inline(&'a InlineNode),
}

impl Node<'_> {
    #[must_use]
    pub fn range(&self) -> Range {
        match self {
            Node::Block(block) => block.range(),
            Node::Inline(inline) => inline.range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::encode;
    use pretty_assertions::assert_eq;

    #[test]
    fn attachable_visible_range_is_single_trailing_unit() {
        let line = encode(&HorizontalRule::native_representation());
        let rule = HorizontalRule::from_line(&line, Range::new(10, line.len())).unwrap();
        let block = BlockNode::HorizontalRule(rule);
        assert!(block.is_attachable());
        assert_eq!(Range::new(27, 1), block.visible_range());
        assert_eq!(vec![Range::new(10, 17)], block.hidden_ranges());
    }

    #[test]
    fn offset_shifts_all_ranges() {
        let line = encode("⧙checklist-0⧘-[ ] Hello");
        let item = ChecklistItem::from_line(&line, Range::new(0, line.len())).unwrap();
        let block = BlockNode::ChecklistItem(item).offset(7);
        assert_eq!(Range::new(7, 23), block.range());
        assert_eq!(Range::new(25, 5), block.visible_range());
        let BlockNode::ChecklistItem(item) = &block else {
            unreachable!()
        };
        assert_eq!(Range::new(22, 1), item.state_range);
    }

    #[test]
    fn serializes_with_type_tag() {
        let line = encode("⧙blockquote⧘> Two");
        let quote = Blockquote::from_line(&line, Range::new(0, line.len())).unwrap();
        let json = serde_json::to_value(BlockNode::Blockquote(quote)).unwrap();
        assert_eq!("blockquote", json["type"]);
        assert_eq!(0, json["range"]["location"]);
        assert_eq!(17, json["range"]["length"]);
    }
}
