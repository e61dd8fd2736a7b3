//! Read-only renderings of a document.
//!
//! `plain` strips all syntax: hidden ranges and inline style delimiters.
//! `markdown` re-emits portable markdown, renumbering ordered lists per
//! nesting level and re-fencing code runs.

use crate::document::Document;
use crate::node::kinds::ChecklistState;
use crate::node::{BlockNode, ATTACHMENT_CHARACTER};
use crate::range::Range;
use crate::text::Text;

/// The document as unstyled text, one line per block.
#[must_use]
pub fn plain(document: &Document) -> String {
    document
        .blocks()
        .iter()
        .map(|block| plain_block(document, block))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One block as unstyled text: hidden ranges and style delimiters removed,
/// attachables as their placeholder unit.
#[must_use]
pub fn plain_block(document: &Document, block: &BlockNode) -> String {
    if block.is_attachable() {
        return ATTACHMENT_CHARACTER.to_string();
    }
    let mut removals: Vec<Range> = block.hidden_ranges();
    for inline in block.subnodes() {
        removals.extend(inline.foldable_ranges());
    }
    removals.sort_by_key(|r| r.location);

    let units = document.backing().units();
    let mut out = Text::default();
    let mut cursor = block.range().location;
    for range in removals {
        out.push_units(&units[cursor..range.location]);
        cursor = range.max();
    }
    out.push_units(&units[cursor..block.range().max()]);
    out.to_string()
}

/// The document as portable markdown.
///
/// Ordered items are renumbered from 1 per nesting level, ignoring their
/// written ordinals. List nesting is expressed as four spaces per level.
#[must_use]
pub fn markdown(document: &Document) -> String {
    let blocks = document.blocks();
    let mut lines = vec![];
    let mut counters: Vec<u32> = vec![];

    for (index, block) in blocks.iter().enumerate() {
        if !matches!(block, BlockNode::OrderedListItem(_)) {
            counters.clear();
        }
        match block {
            BlockNode::Title(node) => {
                lines.push(document.presentation_substring(node.range));
            }
            BlockNode::Paragraph(node) => {
                lines.push(document.presentation_substring(node.range));
            }
            BlockNode::Heading(node) => {
                lines.push(document.presentation_substring(node.range));
            }
            BlockNode::Blockquote(node) => {
                lines.push(format!("> {}", document.presentation_substring(node.range)));
            }
            BlockNode::CodeBlock(code) => {
                if code.line_number == 1 {
                    lines.push(format!("```{}", code.language.as_deref().unwrap_or("")));
                }
                lines.push(document.presentation_substring(code.range));
                let run_continues =
                    matches!(blocks.get(index + 1), Some(BlockNode::CodeBlock(_)));
                if !run_continues {
                    lines.push("```".to_string());
                }
            }
            BlockNode::UnorderedListItem(node) => {
                lines.push(format!(
                    "{}- {}",
                    indent(node.indentation.0),
                    document.presentation_substring(node.range)
                ));
            }
            BlockNode::OrderedListItem(node) => {
                let level = node.indentation.0 as usize;
                counters.truncate(level + 1);
                while counters.len() <= level {
                    counters.push(0);
                }
                counters[level] += 1;
                lines.push(format!(
                    "{}{}. {}",
                    indent(node.indentation.0),
                    counters[level],
                    document.presentation_substring(node.range)
                ));
            }
            BlockNode::ChecklistItem(node) => {
                let marker = match node.state {
                    ChecklistState::Checked => 'x',
                    ChecklistState::Unchecked => ' ',
                };
                lines.push(format!(
                    "{}- [{marker}] {}",
                    indent(node.indentation.0),
                    document.presentation_substring(node.range)
                ));
            }
            BlockNode::Image(node) => {
                lines.push(format!("![]({})", node.meta.url));
            }
            BlockNode::HorizontalRule(_) => {
                lines.push("---".to_string());
            }
        }
    }
    lines.join("\n")
}

fn indent(level: u8) -> String {
    "    ".repeat(level as usize)
}
