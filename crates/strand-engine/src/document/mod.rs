//! The document: a backing string, its parsed block tree, and the projected
//! presentation string, with range translation between the two sides.
//!
//! The backing string is canonical. The presentation string is derived by
//! walking the blocks in order, dropping each block's hidden sub-ranges and
//! collapsing attachables to a single placeholder unit. Both strings and all
//! ranges are measured in UTF-16 code units.

use crate::node::{BlockNode, Node, ATTACHMENT_CHARACTER};
use crate::parsing;
use crate::range::{NoncontiguousRange, Range};
use crate::text::Text;

/// Which side of a block boundary a presentation location resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Leading,
    Trailing,
}

/// An immutable snapshot of a parsed document.
///
/// Edits never mutate a `Document`; the change engine builds a new snapshot
/// and diffs the two.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    backing: Text,
    presentation: Text,
    blocks: Vec<BlockNode>,
    /// Every hidden sub-range of every block, ascending and disjoint.
    /// Separator newlines belong to no block and are never hidden.
    hidden_ranges: Vec<Range>,
    /// Presentation-side range of each block, parallel to `blocks`.
    block_ranges: Vec<Range>,
}

impl Document {
    #[must_use]
    pub fn new(backing: &str) -> Self {
        Self::from_text(Text::new(backing))
    }

    pub(crate) fn from_text(backing: Text) -> Self {
        let blocks = parsing::parse(&backing);

        let mut presentation = Text::default();
        let mut hidden_ranges = vec![];
        let mut block_ranges = vec![];
        let mut location = 0;

        for (index, block) in blocks.iter().enumerate() {
            if index > 0 {
                presentation.push_char('\n');
                location += 1;
            }
            let block_hidden = block.hidden_ranges();
            if block.is_attachable() {
                presentation.push_char(ATTACHMENT_CHARACTER);
                block_ranges.push(Range::new(location, 1));
                location += 1;
            } else {
                let mut cursor = block.range().location;
                let mut visible = 0;
                for sub in &block_hidden {
                    presentation.push_units(&backing.units()[cursor..sub.location]);
                    visible += sub.location - cursor;
                    cursor = sub.max();
                }
                presentation.push_units(&backing.units()[cursor..block.range().max()]);
                visible += block.range().max() - cursor;
                block_ranges.push(Range::new(location, visible));
                location += visible;
            }
            hidden_ranges.extend(block_hidden);
        }

        Self {
            backing,
            presentation,
            blocks,
            hidden_ranges,
            block_ranges,
        }
    }

    #[must_use]
    pub fn backing(&self) -> &Text {
        &self.backing
    }

    #[must_use]
    pub fn presentation(&self) -> &Text {
        &self.presentation
    }

    #[must_use]
    pub fn backing_string(&self) -> String {
        self.backing.to_string()
    }

    #[must_use]
    pub fn presentation_string(&self) -> String {
        self.presentation.to_string()
    }

    #[must_use]
    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    #[must_use]
    pub fn hidden_ranges(&self) -> &[Range] {
        &self.hidden_ranges
    }

    /// The presentation-side range of each block, parallel to `blocks`.
    #[must_use]
    pub fn block_presentation_ranges(&self) -> &[Range] {
        &self.block_ranges
    }

    /// The plain-rendered text of the title block, when the document has one.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self.blocks.first() {
            Some(block @ BlockNode::Title(_)) => Some(crate::render::plain_block(self, block)),
            _ => None,
        }
    }

    /// A one-line summary: the first non-blank presentation line after the
    /// first, falling back to the first line itself.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let lines = self.presentation.line_ranges();
        lines
            .iter()
            .skip(1)
            .map(|&range| self.presentation.substring(range))
            .find(|line| !line.trim().is_empty())
            .or_else(|| {
                lines
                    .first()
                    .map(|&range| self.presentation.substring(range))
                    .filter(|line| !line.trim().is_empty())
            })
    }

    /// Translates a backing range to its presentation counterpart.
    ///
    /// Each hidden range before the target shifts it left; overlap with a
    /// hidden range shortens it.
    #[must_use]
    pub fn presentation_range(&self, backing: Range) -> Range {
        let mut result = backing;
        for &hidden in &self.hidden_ranges {
            if hidden.location > backing.max() {
                break;
            }
            if let Some(overlap) = hidden.intersection_len(backing) {
                result.length -= overlap;
            }
            if hidden.location < backing.location {
                result.location -= hidden.length.min(backing.location - hidden.location);
            }
        }
        result
    }

    /// The presentation range of the block at `index`.
    #[must_use]
    pub fn presentation_range_for_index(&self, index: usize) -> Option<Range> {
        self.block_ranges.get(index).copied()
    }

    /// The presentation range of `block`, whether or not it belongs to this
    /// snapshot. Foreign blocks are translated through their visible range.
    #[must_use]
    pub fn presentation_range_for_block(&self, block: &BlockNode) -> Range {
        match self.index_of(block) {
            Some(index) => self.block_ranges[index],
            None => self.presentation_range(block.visible_range()),
        }
    }

    /// The presentation text of the block at `index`.
    #[must_use]
    pub fn presentation_substring_for_index(&self, index: usize) -> Option<String> {
        self.block_ranges
            .get(index)
            .map(|&range| self.presentation.substring(range))
    }

    /// The visible portion of an arbitrary backing range, as presented.
    #[must_use]
    pub fn presentation_substring(&self, backing: Range) -> String {
        let end = backing.max().min(self.backing.len());
        let mut out = Text::default();
        let mut cursor = backing.location.min(end);
        for &hidden in &self.hidden_ranges {
            if hidden.max() <= cursor {
                continue;
            }
            if hidden.location >= end {
                break;
            }
            let visible_end = hidden.location.min(end);
            if visible_end > cursor {
                out.push_units(&self.backing.units()[cursor..visible_end]);
            }
            cursor = cursor.max(hidden.max());
        }
        if cursor < end {
            out.push_units(&self.backing.units()[cursor..end]);
        }
        out.to_string()
    }

    /// Translates a zero-length presentation location to a backing range.
    ///
    /// A cursor touching the boundary of an annotated span resolves to the
    /// adjacent marker sequence so an editor can treat it as one unit.
    #[must_use]
    pub fn backing_range_at(&self, presentation_location: usize) -> Range {
        let mut backing = self.pre_backing_range(Range::new(presentation_location, 0));
        for pair in self.inline_marker_pairs() {
            if backing.location == pair.visible_range().location {
                backing.location = pair.opening_marker.range.location;
            } else if backing.location == pair.closing_marker.range.max() {
                backing.location = pair.closing_marker.range.location;
            }
        }
        backing
    }

    /// Translates a presentation range to the backing side.
    ///
    /// The result is a set: a selection that covers only part of an annotated
    /// span excludes the marker sequences, splitting the range, while a
    /// selection covering the whole span takes the markers with it.
    #[must_use]
    pub fn backing_ranges(&self, presentation: Range) -> NoncontiguousRange {
        if presentation.is_empty() {
            return NoncontiguousRange::new([self.backing_range_at(presentation.location)]);
        }
        let mut set = NoncontiguousRange::new([self.pre_backing_range(presentation)]);
        for pair in self.inline_marker_pairs() {
            let visible = pair.visible_range();
            if !visible.is_empty() && set.intersection_len(visible) == visible.length {
                set.insert(pair.range());
            } else {
                set.remove(pair.opening_marker.range);
                set.remove(pair.closing_marker.range);
            }
        }
        set
    }

    /// The shared first pass of presentation-to-backing translation: shift
    /// past hidden ranges before the target and absorb hidden ranges inside
    /// it, then widen over any attachable the result overlaps.
    fn pre_backing_range(&self, presentation: Range) -> Range {
        let mut backing = presentation;
        for &hidden in &self.hidden_ranges {
            if hidden.location < backing.location {
                backing.location += hidden.length;
            } else if hidden.location <= backing.max() {
                // The end grows as hidden ranges are absorbed, so a run of
                // adjacent hidden ranges cascades into the result.
                backing.length += hidden.length;
            }
        }
        for block in &self.blocks {
            if block.is_attachable() && backing.intersection(block.range()).is_some() {
                backing = backing.union(block.range());
            }
        }
        backing
    }

    /// The block whose line covers `location`. The end of the document
    /// resolves to the last block; separator newlines resolve to nothing.
    #[must_use]
    pub fn block_at_backing_location(&self, location: usize) -> Option<&BlockNode> {
        if let Some(last) = self.blocks.last() {
            if location == last.range().max() {
                return Some(last);
            }
        }
        self.blocks
            .iter()
            .find(|block| block.range().contains(location))
    }

    /// The block at a presentation location. On the boundary between two
    /// blocks, `direction` picks the side.
    #[must_use]
    pub fn block_at_presentation_location(
        &self,
        location: usize,
        direction: Direction,
    ) -> Option<&BlockNode> {
        for (index, &range) in self.block_ranges.iter().enumerate() {
            if range.contains(location) || range.max() == location {
                if direction == Direction::Trailing && range.max() == location {
                    if let Some(&next) = self.block_ranges.get(index + 1) {
                        if location + 1 == next.location {
                            return self.blocks.get(index + 1);
                        }
                    }
                }
                return self.blocks.get(index);
            }
        }
        None
    }

    /// Blocks whose lines overlap `backing`. Each block's range is widened
    /// by one unit so a query starting on the separator newline still
    /// catches the preceding block.
    #[must_use]
    pub fn blocks_in_backing_range(&self, backing: Range) -> Vec<&BlockNode> {
        self.blocks
            .iter()
            .filter(|block| extended(block.range()).intersection(backing).is_some())
            .collect()
    }

    /// Blocks whose presentation ranges overlap `presentation`, with the
    /// same one-unit widening as the backing side.
    #[must_use]
    pub fn blocks_in_presentation_range(&self, presentation: Range) -> Vec<&BlockNode> {
        self.blocks
            .iter()
            .zip(&self.block_ranges)
            .filter(|&(_, &range)| extended(range).intersection(presentation).is_some())
            .map(|(block, _)| block)
            .collect()
    }

    /// Every node, block or inline, whose backing range overlaps `backing`.
    /// A zero-length range matches nodes it touches on either end.
    #[must_use]
    pub fn nodes_in_backing_range(&self, backing: Range) -> Vec<Node<'_>> {
        let mut nodes = vec![];
        for block in &self.blocks {
            if !touches(backing, block.range()) {
                continue;
            }
            nodes.push(Node::Block(block));
            for inline in block.subnodes() {
                if touches(backing, inline.range()) {
                    nodes.push(Node::Inline(inline));
                }
            }
        }
        nodes
    }

    #[must_use]
    pub fn nodes_in_backing_ranges(&self, backing: &NoncontiguousRange) -> Vec<Node<'_>> {
        backing
            .ranges()
            .iter()
            .flat_map(|&range| self.nodes_in_backing_range(range))
            .collect()
    }

    /// The index of the block occupying the same line as `block`.
    #[must_use]
    pub fn index_of(&self, block: &BlockNode) -> Option<usize> {
        self.blocks
            .iter()
            .position(|candidate| candidate.range() == block.range())
    }

    fn inline_marker_pairs(&self) -> impl Iterator<Item = &crate::node::InlineMarkerPair> {
        self.blocks.iter().flat_map(|block| block.inline_marker_pairs())
    }
}

fn extended(range: Range) -> Range {
    Range::new(range.location, range.length + 1)
}

fn touches(probe: Range, target: Range) -> bool {
    if probe.is_empty() {
        target.contains(probe.location) || target.max() == probe.location
    } else {
        target.intersection(probe).is_some()
    }
}
