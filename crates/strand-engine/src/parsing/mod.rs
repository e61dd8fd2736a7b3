//! Turns a backing string into a block tree.
//!
//! Each line of the backing string becomes exactly one block. Classification
//! is first-match over the kinds' own line parsers, so each kind owns its
//! syntax; anything unrecognized falls back to a paragraph.

mod inline;

use crate::node::kinds::{
    Blockquote, ChecklistItem, CodeBlock, Heading, HorizontalRule, Image, OrderedListItem,
    Paragraph, Title, UnorderedListItem,
};
use crate::node::BlockNode;
use crate::range::Range;
use crate::text::Text;

/// Parses a backing string into its block nodes.
///
/// The empty string parses to zero blocks. A trailing newline yields a
/// trailing empty paragraph, matching what an editor shows after Return.
#[must_use]
pub fn parse(text: &Text) -> Vec<BlockNode> {
    let mut blocks: Vec<BlockNode> = text
        .line_ranges()
        .into_iter()
        .enumerate()
        .map(|(index, range)| classify(text.slice(range), range, index == 0))
        .collect();
    assign_code_line_numbers(&mut blocks);
    for block in &mut blocks {
        inline::scan(text, block);
    }
    blocks
}

fn classify(line: &[u16], range: Range, first_line: bool) -> BlockNode {
    // The title prefix is only meaningful on the first line; further down it
    // reads as a paragraph.
    if first_line {
        if let Some(node) = Title::from_line(line, range) {
            return BlockNode::Title(node);
        }
    }
    if let Some(node) = Image::from_line(line, range) {
        return BlockNode::Image(node);
    }
    if let Some(node) = HorizontalRule::from_line(line, range) {
        return BlockNode::HorizontalRule(node);
    }
    if let Some(node) = Blockquote::from_line(line, range) {
        return BlockNode::Blockquote(node);
    }
    if let Some(node) = CodeBlock::from_line(line, range) {
        return BlockNode::CodeBlock(node);
    }
    if let Some(node) = ChecklistItem::from_line(line, range) {
        return BlockNode::ChecklistItem(node);
    }
    if let Some(node) = UnorderedListItem::from_line(line, range) {
        return BlockNode::UnorderedListItem(node);
    }
    if let Some(node) = OrderedListItem::from_line(line, range) {
        return BlockNode::OrderedListItem(node);
    }
    if let Some(node) = Heading::from_line(line, range) {
        return BlockNode::Heading(node);
    }
    BlockNode::Paragraph(Paragraph::from_line(range))
}

/// Numbers consecutive code blocks 1..n, resetting whenever the run breaks.
fn assign_code_line_numbers(blocks: &mut [BlockNode]) {
    let mut run = 0;
    for block in blocks {
        if let BlockNode::CodeBlock(code) = block {
            run += 1;
            code.line_number = run;
        } else {
            run = 0;
        }
    }
}
